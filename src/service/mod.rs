use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::communication::HeartbeatRequest;
use crate::configuration::ViewServiceTimings;
use crate::heartbeat::HeartbeatTracker;
use crate::view::state::{AcknowledgmentProbe, ViewState};
use crate::view::View;

pub type ProtectedViewService = Arc<Mutex<ViewService>>;

/// Controller state shared by the request workers and the transition ticker.
#[derive(Clone, Debug)]
pub struct ViewService {
    pub(crate) tracker: HeartbeatTracker,
    pub(crate) view_state: ViewState,
    pub(crate) timings: ViewServiceTimings,
}

impl ViewService {
    pub fn new(timings: ViewServiceTimings) -> ViewService {
        ViewService {
            tracker: HeartbeatTracker::new(),
            view_state: ViewState::new(),
            timings,
        }
    }

    pub fn into_protected(self) -> ProtectedViewService {
        Arc::new(Mutex::new(self))
    }

    /// Records the heartbeat and returns the committed view. The acknowledgment is checked
    /// against the view number the server reported before this heartbeat.
    pub fn heartbeat(&mut self, request: &HeartbeatRequest, now: Instant) -> View {
        let sender = &request.server_id;
        let previous_view_number = self.tracker.last_reported_view_number(sender);
        let sender_restarted = self.tracker.is_restarted(sender)
            || (request.view_number == 0 && previous_view_number > 0);
        let view = self.view_state.current_view();
        let (primary_failed, primary_adopted_view) = match view.primary {
            Some(ref primary) => (
                self.tracker
                    .is_failed(primary, now, self.timings.dead_interval)
                    || (primary == sender && sender_restarted),
                self.tracker.has_reported_view(primary, view.view_number),
            ),
            None => (false, false),
        };

        self.view_state.try_acknowledge(AcknowledgmentProbe {
            sender,
            reported_view_number: request.view_number,
            previous_view_number,
            sender_restarted,
            primary_failed,
            primary_adopted_view,
        });

        self.tracker.record_heartbeat(sender, request.view_number, now);

        self.query()
    }

    pub fn query(&self) -> View {
        self.view_state.current_view().clone()
    }
}

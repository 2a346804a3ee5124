use crate::errors::{new_err, Result};
use crate::view::{PendingAssignment, Role, ServerId, View};

/// Heartbeat facts needed to decide whether the committed view has been adopted.
/// The previous view number is the one stored before this heartbeat (0 if never reported).
#[derive(Clone, Copy, Debug)]
pub struct AcknowledgmentProbe<'a> {
    pub sender: &'a ServerId,
    pub reported_view_number: u64,
    pub previous_view_number: u64,
    pub sender_restarted: bool,
    pub primary_failed: bool,

    /// The committed primary reported the committed view at least once.
    pub primary_adopted_view: bool,
}

/// Committed view, at most one pending transition and the primary acknowledgment flag.
#[derive(Clone, Debug)]
pub struct ViewState {
    view: View,
    pending: Option<PendingAssignment>,
    primary_acknowledged: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new()
    }
}

impl ViewState {
    pub fn new() -> ViewState {
        ViewState {
            view: View::initial(),
            pending: None,
            primary_acknowledged: false,
        }
    }

    pub fn current_view(&self) -> &View {
        &self.view
    }

    pub fn pending(&self) -> Option<&PendingAssignment> {
        self.pending.as_ref()
    }

    /// No transition is in flight.
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    pub fn is_acknowledged(&self) -> bool {
        self.primary_acknowledged
    }

    /// Raises a proposal for the next view. Returns Ok(false) if a transition is already pending.
    pub fn propose_if_idle(
        &mut self,
        primary: Option<ServerId>,
        backup: Option<ServerId>,
    ) -> Result<bool> {
        if !self.is_idle() {
            return Ok(false);
        }

        if primary.is_none() && backup.is_some() {
            return new_err(
                "Cannot propose a backup without a primary".to_string(),
                format!("backup: {:?}", backup),
            );
        }

        if primary.is_some() && primary == backup {
            return new_err(
                "Cannot propose the same server as primary and backup".to_string(),
                format!("server: {:?}", primary),
            );
        }

        self.pending = Some(PendingAssignment {
            view_number: self.view.view_number + 1,
            primary,
            backup,
        });
        self.primary_acknowledged = false;

        Ok(true)
    }

    /// Evaluates a heartbeat against the committed view and sets the acknowledgment flag
    /// when it proves the view was adopted. Returns the flag value.
    pub fn try_acknowledge(&mut self, probe: AcknowledgmentProbe) -> bool {
        if self.primary_acknowledged {
            return true;
        }

        if probe.sender_restarted || probe.reported_view_number != self.view.view_number {
            return false;
        }

        let candidate_primary = self
            .pending
            .as_ref()
            .map(|pending| pending.role_of(probe.sender) == Role::Primary)
            .unwrap_or(false);

        let acknowledged = match self.view.role_of(probe.sender) {
            // Second report of the same view, or the first report of a server with no state.
            Role::Primary => {
                probe.previous_view_number == self.view.view_number
                    || probe.previous_view_number == 0
            }
            // The primary is gone after adopting the view the backup was installed in.
            Role::Backup => {
                probe.primary_failed && probe.primary_adopted_view && candidate_primary
            }
            Role::Idle => self.view.primary.is_none() && candidate_primary,
        };

        if acknowledged {
            trace!(
                "Server {} acknowledged view {}",
                probe.sender,
                self.view.view_number
            );
            self.primary_acknowledged = true;
        }

        self.primary_acknowledged
    }

    /// Acknowledges a proposal that leaves the view without any role.
    /// Returns false if the pending proposal still names a server.
    pub fn acknowledge_abandonment(&mut self) -> bool {
        match self.pending {
            Some(ref pending) if pending.servers().next().is_none() => {
                self.primary_acknowledged = true;
                true
            }
            _ => false,
        }
    }

    /// Replaces the committed view with the pending one if the flag is set.
    pub fn commit_if_acknowledged(&mut self) -> Option<View> {
        if !self.primary_acknowledged {
            return None;
        }

        let pending = self.pending.take()?;
        self.view = pending.into_view();
        self.primary_acknowledged = false;

        Some(self.view.clone())
    }

    /// Drops the pending proposal without touching the committed view.
    pub fn withdraw_pending(&mut self) -> Option<PendingAssignment> {
        let withdrawn = self.pending.take();
        if withdrawn.is_some() {
            self.primary_acknowledged = false;
        }

        withdrawn
    }
}

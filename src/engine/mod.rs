//! Transition engine: detects failed and restarted servers, proposes the next view and
//! commits it once the acknowledgment flag is raised. One call to `tick` is one atomic
//! decision step under the service lock.

use std::time::Instant;

use crate::service::ViewService;
use crate::view::{ServerId, View};

/// Runs one transition step. Returns the newly committed view, if any.
pub fn tick(service: &mut ViewService, now: Instant) -> Option<View> {
    reevaluate_pending(service, now);

    if service.view_state.is_idle() {
        propose_next_view(service, now);
    }

    acknowledge_abandoned_primary(service, now);

    let committed = service.view_state.commit_if_acknowledged();
    if let Some(ref view) = committed {
        info!("Committed {}", view);
    }

    clear_restart_marks(service);

    committed
}

// A proposal naming a failed server can never be acknowledged safely.
fn reevaluate_pending(service: &mut ViewService, now: Instant) {
    let dead_interval = service.timings.dead_interval;
    let failed_server = match service.view_state.pending() {
        Some(pending) => pending
            .servers()
            .find(|id| service.tracker.is_failed(id, now, dead_interval))
            .cloned(),
        None => None,
    };

    if let Some(server_id) = failed_server {
        if let Some(withdrawn) = service.view_state.withdraw_pending() {
            info!("Withdrawn {}: server {} failed", withdrawn, server_id);
        }
    }
}

fn propose_next_view(service: &mut ViewService, now: Instant) {
    let view = service.view_state.current_view().clone();
    let dead_interval = service.timings.dead_interval;
    let is_failed = |id: &ServerId| service.tracker.is_failed(id, now, dead_interval);

    let proposal = match (&view.primary, &view.backup) {
        (None, _) => {
            first_healthy_server(service, now, None).map(|primary| (Some(primary), None))
        }
        (Some(primary), None) if !is_failed(primary) => {
            first_healthy_server(service, now, Some(primary))
                .map(|backup| (Some(primary.clone()), Some(backup)))
        }
        (Some(primary), backup) if is_failed(primary) => match backup {
            Some(backup) if !is_failed(backup) => {
                info!("Primary {} failed, promoting backup {}", primary, backup);
                Some((Some(backup.clone()), None))
            }
            _ => {
                warn!("Primary {} failed with no backup to promote", primary);
                Some((None, None))
            }
        },
        (Some(primary), Some(backup)) if is_failed(backup) => {
            info!("Backup {} failed", backup);
            Some((Some(primary.clone()), None))
        }
        _ => None,
    };

    if let Some((primary, backup)) = proposal {
        match service.view_state.propose_if_idle(primary, backup) {
            Ok(true) => {
                if let Some(pending) = service.view_state.pending() {
                    debug!("Proposed {}", pending);
                }
            }
            Ok(false) => {}
            Err(err) => error!("View proposal rejected: {}", err),
        }
    }
}

// Nobody is left to adopt a view that only retires a failed primary.
fn acknowledge_abandoned_primary(service: &mut ViewService, now: Instant) {
    let primary_failed = match service.view_state.current_view().primary {
        Some(ref primary) => service
            .tracker
            .is_failed(primary, now, service.timings.dead_interval),
        None => false,
    };

    if primary_failed && service.view_state.acknowledge_abandonment() {
        debug!("Abandoned view acknowledged");
    }
}

fn first_healthy_server(
    service: &ViewService,
    now: Instant,
    excluded: Option<&ServerId>,
) -> Option<ServerId> {
    service
        .tracker
        .servers()
        .filter(|id| Some(*id) != excluded)
        .find(|id| !service.tracker.is_failed(id, now, service.timings.dead_interval))
        .cloned()
}

fn clear_restart_marks(service: &mut ViewService) {
    let view = service.view_state.current_view();
    let pending = service.view_state.pending();
    let without_role: Vec<ServerId> = service
        .tracker
        .servers()
        .filter(|id| service.tracker.is_restarted(id))
        .filter(|id| !view.holds_role(id))
        .filter(|id| !pending.map(|pending| pending.servers().any(|s| s == *id)).unwrap_or(false))
        .cloned()
        .collect();

    for server_id in without_role {
        trace!("Server {} holds no role, restart mark cleared", server_id);
        service.tracker.clear_restarted(&server_id);
    }
}

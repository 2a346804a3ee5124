use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::view::ServerId;

/// Liveness facts about a server, as of its latest heartbeat.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HeartbeatRecord {
    pub last_seen_at: Instant,
    pub last_reported_view_number: u64,

    /// Highest view the server ever reported, kept across restarts.
    pub highest_reported_view_number: u64,

    /// The server reported view 0 after a non-zero view: it lost its in-memory state.
    pub restarted: bool,
}

/// Per-server heartbeat records. Records are never removed.
#[derive(Clone, Debug, Default)]
pub struct HeartbeatTracker {
    records: BTreeMap<ServerId, HeartbeatRecord>,
}

impl HeartbeatTracker {
    pub fn new() -> HeartbeatTracker {
        HeartbeatTracker {
            records: BTreeMap::new(),
        }
    }

    pub fn record_heartbeat(&mut self, server_id: &ServerId, reported_view_number: u64, now: Instant) {
        match self.records.get_mut(server_id) {
            Some(record) => {
                if reported_view_number == 0 && record.last_reported_view_number > 0 {
                    debug!(
                        "Server {} restarted: reported view 0 after view {}",
                        server_id, record.last_reported_view_number
                    );
                    record.restarted = true;
                }
                record.last_seen_at = now;
                record.last_reported_view_number = reported_view_number;
                record.highest_reported_view_number =
                    record.highest_reported_view_number.max(reported_view_number);
            }
            None => {
                debug!("First heartbeat from server {}", server_id);
                self.records.insert(
                    server_id.clone(),
                    HeartbeatRecord {
                        last_seen_at: now,
                        last_reported_view_number: reported_view_number,
                        highest_reported_view_number: reported_view_number,
                        restarted: false,
                    },
                );
            }
        }
    }

    pub fn is_alive(&self, server_id: &ServerId, now: Instant, dead_interval: Duration) -> bool {
        match self.records.get(server_id) {
            Some(record) => now.saturating_duration_since(record.last_seen_at) < dead_interval,
            None => false,
        }
    }

    /// Last reported view number, 0 for a server that was never seen.
    pub fn last_reported_view_number(&self, server_id: &ServerId) -> u64 {
        self.records
            .get(server_id)
            .map(|record| record.last_reported_view_number)
            .unwrap_or(0)
    }

    /// The server reported the view at some point, even if it restarted since.
    pub fn has_reported_view(&self, server_id: &ServerId, view_number: u64) -> bool {
        self.records
            .get(server_id)
            .map(|record| record.highest_reported_view_number >= view_number)
            .unwrap_or(false)
    }

    pub fn is_restarted(&self, server_id: &ServerId) -> bool {
        self.records
            .get(server_id)
            .map(|record| record.restarted)
            .unwrap_or(false)
    }

    pub fn clear_restarted(&mut self, server_id: &ServerId) {
        if let Some(record) = self.records.get_mut(server_id) {
            record.restarted = false;
        }
    }

    /// Dead or restarted: the server cannot keep or take a role.
    pub fn is_failed(&self, server_id: &ServerId, now: Instant, dead_interval: Duration) -> bool {
        !self.is_alive(server_id, now, dead_interval) || self.is_restarted(server_id)
    }

    /// Tracked servers in ascending id order.
    pub fn servers(&self) -> impl Iterator<Item = &ServerId> {
        self.records.keys()
    }
}

use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub type Counter = AtomicU64;

/// Live diagnostic counters of the view service.
#[derive(Debug, Clone, Default)]
pub struct ViewServiceStatistics(Arc<ViewServiceStatisticsInner>);

impl Deref for ViewServiceStatistics {
    type Target = ViewServiceStatisticsInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Default)]
pub struct ViewServiceStatisticsInner {
    /// The number of heartbeat requests answered.
    pub(crate) heartbeats_received: Counter,
    /// The number of query requests answered.
    pub(crate) queries_served: Counter,
    /// The number of transition engine runs.
    pub(crate) ticks: Counter,
    /// The number of views committed since start.
    pub(crate) views_committed: Counter,
}

impl ViewServiceStatisticsInner {
    /// The number of requests of any kind answered.
    pub fn requests_served(&self) -> u64 {
        self.heartbeats_received() + self.queries_served()
    }

    pub fn heartbeats_received(&self) -> u64 {
        self.heartbeats_received.load(Ordering::Relaxed)
    }

    pub fn queries_served(&self) -> u64 {
        self.queries_served.load(Ordering::Relaxed)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn views_committed(&self) -> u64 {
        self.views_committed.load(Ordering::Relaxed)
    }

    pub(crate) fn increment(counter: &Counter) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

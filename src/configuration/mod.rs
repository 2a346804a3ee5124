use std::time::Duration;

use crate::communication::ViewServiceRequestChannels;
use crate::errors::{new_err, ViewServiceError};

/// Timings of the view service.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ViewServiceTimings {
    /// Period of the transition engine. Servers are expected to heartbeat at the same rate.
    pub tick_interval: Duration,

    /// A server that did not heartbeat for this long is considered dead.
    pub dead_interval: Duration,
}

impl Default for ViewServiceTimings {
    fn default() -> Self {
        ViewServiceTimings {
            tick_interval: Duration::from_millis(100),
            dead_interval: Duration::from_millis(500), //5 ticks
        }
    }
}

impl ViewServiceTimings {
    /// Creates timings with the dead interval of `dead_ticks` tick intervals.
    pub fn with_dead_ticks(tick_interval: Duration, dead_ticks: u32) -> ViewServiceTimings {
        ViewServiceTimings {
            tick_interval,
            dead_interval: tick_interval * dead_ticks,
        }
    }

    pub fn validate(&self) -> Result<(), ViewServiceError> {
        if self.tick_interval == Duration::from_millis(0) {
            return new_err("Invalid view service timings".to_string(),
                           "tick interval is zero".to_string());
        }

        if self.dead_interval <= self.tick_interval {
            return new_err("Invalid view service timings".to_string(),
                           format!("dead interval {:?} must exceed tick interval {:?}",
                                   self.dead_interval, self.tick_interval));
        }

        Ok(())
    }
}

/// View service configuration: request channels provider and timings.
#[derive(Clone, Debug)]
pub struct ViewServiceConfiguration<Rc>
where
    Rc: ViewServiceRequestChannels,
{
    pub request_channels: Rc,
    pub timings: ViewServiceTimings,
}

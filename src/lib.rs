//! # View service
//!
//! Membership and failover controller for a primary-backup replicated service. Candidate
//! servers heartbeat the view service with the last view they know; the service tracks
//! their liveness, picks the primary and the backup, and changes the view only after the
//! primary has confirmed the current one.

#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate crossbeam_channel;
#[macro_use]
extern crate derive_more;

mod common;
mod communication;
mod configuration;
mod engine;
mod errors;
mod heartbeat;
mod server;
mod service;
mod statistics;
mod view;
mod workers;

pub use communication::{
    Envelope, HeartbeatRequest, HeartbeatResponse, QueryRequest, QueryResponse,
    ViewServiceRequestChannels, ViewServiceRequestHandler,
};
pub use configuration::{ViewServiceConfiguration, ViewServiceTimings};
pub use errors::{new_err, ViewServiceError};
pub use server::ViewServiceWorker;
pub use statistics::{ViewServiceStatistics, ViewServiceStatisticsInner};
pub use view::{Role, ServerId, View};

/// Starts the view service on background threads. Fails on invalid timings.
pub fn start_view_service<Rc>(
    config: ViewServiceConfiguration<Rc>,
) -> Result<ViewServiceWorker, ViewServiceError>
where
    Rc: ViewServiceRequestChannels,
{
    config.timings.validate()?;

    let statistics = ViewServiceStatistics::default();
    let worker = common::run_worker(
        server::start,
        server::ViewServerParams {
            config,
            statistics: statistics.clone(),
        },
    );

    Ok(ViewServiceWorker::new(worker, statistics))
}

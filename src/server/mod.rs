use crossbeam_channel::Receiver;

use crate::common::{self, Worker, WorkerPool};
use crate::communication::ViewServiceRequestChannels;
use crate::configuration::ViewServiceConfiguration;
use crate::errors::{new_err, ViewServiceError};
use crate::service::ViewService;
use crate::statistics::ViewServiceStatistics;
use crate::workers::request_processor::{process_view_service_requests, RequestProcessorParams};
use crate::workers::transition_ticker::{run_transition_ticks, TransitionTickerParams};

pub struct ViewServerParams<Rc>
where
    Rc: ViewServiceRequestChannels,
{
    pub config: ViewServiceConfiguration<Rc>,
    pub statistics: ViewServiceStatistics,
}

/// Owns the controller state for the worker lifetime: starts the request processor and the
/// transition ticker, then waits for the termination signal.
pub fn start<Rc>(params: ViewServerParams<Rc>, terminate_worker_rx: Receiver<()>)
where
    Rc: ViewServiceRequestChannels,
{
    let timings = params.config.timings;
    let protected_service = ViewService::new(timings).into_protected();

    let request_processor_worker = common::run_worker(
        process_view_service_requests,
        RequestProcessorParams {
            protected_service: protected_service.clone(),
            statistics: params.statistics.clone(),
            request_channels: params.config.request_channels,
        },
    );

    let transition_ticker_worker = common::run_worker(
        run_transition_ticks,
        TransitionTickerParams {
            protected_service,
            statistics: params.statistics,
            tick_interval: timings.tick_interval,
        },
    );

    let worker_pool = WorkerPool::new(vec![request_processor_worker, transition_ticker_worker]);

    info!(
        "View service started: tick {:?}, dead interval {:?}",
        timings.tick_interval, timings.dead_interval
    );

    let terminate_result = terminate_worker_rx.recv();
    if let Err(e) = terminate_result {
        error!("Abnormal exit for view service: {}", e);
    }

    info!("View service termination requested");

    worker_pool.terminate();
    worker_pool.join();

    info!("View service shutting down");
}

/// Handle of a running view service.
#[derive(Debug)]
pub struct ViewServiceWorker {
    worker: Worker,
    statistics: ViewServiceStatistics,
}

impl ViewServiceWorker {
    pub(crate) fn new(worker: Worker, statistics: ViewServiceStatistics) -> ViewServiceWorker {
        ViewServiceWorker { worker, statistics }
    }

    pub fn statistics(&self) -> &ViewServiceStatistics {
        &self.statistics
    }

    /// Stops accepting requests and waits for the service workers to finish.
    pub fn terminate(self) -> Result<(), ViewServiceError> {
        if let Err(err) = self.worker.terminate_worker_tx.send(()) {
            return new_err("Cannot send termination signal".to_string(), err.to_string());
        }

        if self.worker.join_handle.join().is_err() {
            return new_err("View service worker panicked".to_string(), String::new());
        }

        Ok(())
    }
}

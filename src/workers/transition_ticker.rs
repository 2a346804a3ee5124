use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::engine;
use crate::service::ProtectedViewService;
use crate::statistics::{ViewServiceStatistics, ViewServiceStatisticsInner};

pub struct TransitionTickerParams {
    pub protected_service: ProtectedViewService,
    pub statistics: ViewServiceStatistics,
    pub tick_interval: Duration,
}

/// Runs the transition engine once per tick interval until termination is requested.
pub fn run_transition_ticks(params: TransitionTickerParams, terminate_worker_rx: Receiver<()>) {
    info!("View transition ticker started");
    let ticker = crossbeam_channel::tick(params.tick_interval);
    loop {
        select!(
            recv(terminate_worker_rx) -> res => {
                if res.is_err() {
                    error!("Abnormal exit for view transition ticker");
                }
                break
            },
            recv(ticker) -> _ => {
                run_transition_step(&params)
            },
        );
    }
    info!("View transition ticker stopped");
}

fn run_transition_step(params: &TransitionTickerParams) {
    let committed = {
        let mut service = params.protected_service.lock();
        engine::tick(&mut service, Instant::now())
    };

    ViewServiceStatisticsInner::increment(&params.statistics.ticks);
    if committed.is_some() {
        ViewServiceStatisticsInner::increment(&params.statistics.views_committed);
    }
}

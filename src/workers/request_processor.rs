use std::time::Instant;

use crossbeam_channel::Receiver;

use crate::communication::{
    Envelope, HeartbeatRequest, HeartbeatResponse, QueryRequest, QueryResponse,
    ViewServiceRequestChannels,
};
use crate::service::ProtectedViewService;
use crate::statistics::{ViewServiceStatistics, ViewServiceStatisticsInner};

pub struct RequestProcessorParams<Rc>
where
    Rc: ViewServiceRequestChannels,
{
    pub protected_service: ProtectedViewService,
    pub statistics: ViewServiceStatistics,
    pub request_channels: Rc,
}

/// Receives requests until termination is requested. Every request is served on the rayon
/// thread pool; requests already dispatched complete after the worker stops.
pub fn process_view_service_requests<Rc>(
    params: RequestProcessorParams<Rc>,
    terminate_worker_rx: Receiver<()>,
) where
    Rc: ViewServiceRequestChannels,
{
    let heartbeat_request_rx = params.request_channels.heartbeat_request_rx();
    let query_request_rx = params.request_channels.query_request_rx();

    info!("View service request processor started");
    loop {
        select!(
            recv(terminate_worker_rx) -> res => {
                if res.is_err() {
                    error!("Abnormal exit for view service request processor");
                }
                break
            },
            recv(heartbeat_request_rx) -> res => {
                match res {
                    Ok(envelope) => dispatch_heartbeat(&params, envelope),
                    Err(err) => {
                        error!("Heartbeat request channel closed: {}", err);
                        break
                    }
                }
            },
            recv(query_request_rx) -> res => {
                match res {
                    Ok(envelope) => dispatch_query(&params, envelope),
                    Err(err) => {
                        error!("Query request channel closed: {}", err);
                        break
                    }
                }
            },
        );
    }
    info!("View service request processor stopped");
}

fn dispatch_heartbeat<Rc>(
    params: &RequestProcessorParams<Rc>,
    envelope: Envelope<HeartbeatRequest, HeartbeatResponse>,
) where
    Rc: ViewServiceRequestChannels,
{
    let protected_service = params.protected_service.clone();
    let statistics = params.statistics.clone();

    rayon::spawn(move || {
        trace!("Received {}", envelope.request);
        let view = {
            let mut service = protected_service.lock();
            service.heartbeat(&envelope.request, Instant::now())
        };
        ViewServiceStatisticsInner::increment(&statistics.heartbeats_received);

        let server_id = envelope.request.server_id.clone();
        if let Err(err) = envelope.reply(HeartbeatResponse { view }) {
            warn!("Heartbeat response to {} dropped: {}", server_id, err);
        }
    });
}

fn dispatch_query<Rc>(
    params: &RequestProcessorParams<Rc>,
    envelope: Envelope<QueryRequest, QueryResponse>,
) where
    Rc: ViewServiceRequestChannels,
{
    let protected_service = params.protected_service.clone();
    let statistics = params.statistics.clone();

    rayon::spawn(move || {
        let view = protected_service.lock().query();
        ViewServiceStatisticsInner::increment(&statistics.queries_served);

        if let Err(err) = envelope.reply(QueryResponse { view }) {
            warn!("Query response dropped: {}", err);
        }
    });
}

use crate::communication::duplex_channel::DuplexChannel;

use crossbeam_channel::Receiver;
use viewservice::{
    Envelope, HeartbeatRequest, HeartbeatResponse, QueryRequest, QueryResponse, ViewServiceError,
    ViewServiceRequestChannels, ViewServiceRequestHandler,
};

use std::time::Duration;

/// Basic in-memory implementation of the ViewServiceRequestHandler and
/// ViewServiceRequestChannels traits. Clones share the same channels.
#[derive(Clone, Debug)]
pub struct InProcViewServiceCommunicator {
    heartbeat_duplex_channel: DuplexChannel<HeartbeatRequest, HeartbeatResponse>,
    query_duplex_channel: DuplexChannel<QueryRequest, QueryResponse>,
}

impl InProcViewServiceCommunicator {
    /// Create new instance of the InProcViewServiceCommunicator with the service name and
    /// communication timeout.
    pub fn new(service_name: &str, timeout: Duration) -> InProcViewServiceCommunicator {
        InProcViewServiceCommunicator {
            heartbeat_duplex_channel: DuplexChannel::new(
                format!("Heartbeat channel ViewService={}", service_name),
                timeout,
            ),
            query_duplex_channel: DuplexChannel::new(
                format!("Query channel ViewService={}", service_name),
                timeout,
            ),
        }
    }
}

impl ViewServiceRequestChannels for InProcViewServiceCommunicator {
    fn heartbeat_request_rx(&self) -> Receiver<Envelope<HeartbeatRequest, HeartbeatResponse>> {
        self.heartbeat_duplex_channel.request_rx()
    }

    fn query_request_rx(&self) -> Receiver<Envelope<QueryRequest, QueryResponse>> {
        self.query_duplex_channel.request_rx()
    }
}

impl ViewServiceRequestHandler for InProcViewServiceCommunicator {
    fn heartbeat(&self, request: HeartbeatRequest) -> Result<HeartbeatResponse, ViewServiceError> {
        trace!("Sending request {}", request);

        let resp = self.heartbeat_duplex_channel.send_request(request);

        trace!("Heartbeat response {:?}", resp);

        resp
    }

    fn query(&self, request: QueryRequest) -> Result<QueryResponse, ViewServiceError> {
        trace!("Query request {:?}", request);

        self.query_duplex_channel.send_request(request)
    }
}

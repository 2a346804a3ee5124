use crossbeam_channel::{Receiver, Sender};

use crate::errors::{new_err, ViewServiceError};
use crate::view::{ServerId, View};

/// Heartbeat of a candidate server: its identity and the last view number it knows.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Display)]
#[display(fmt = "Heartbeat from {} (view {})", server_id, view_number)]
pub struct HeartbeatRequest {
    pub server_id: ServerId,

    /// Zero for a server that has just started.
    pub view_number: u64,
}

/// Committed view returned to the heartbeating server.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Display)]
#[display(fmt = "Heartbeat response: {}", view)]
pub struct HeartbeatResponse {
    pub view: View,
}

/// Request for the committed view. Does not register the caller as a candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
pub struct QueryRequest;

/// Committed view returned to a client.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Display)]
#[display(fmt = "Query response: {}", view)]
pub struct QueryResponse {
    pub view: View,
}

/// Request delivered to the view service together with the channel for its response.
#[derive(Debug)]
pub struct Envelope<Request, Response> {
    pub request: Request,
    reply_tx: Sender<Response>,
}

impl<Request, Response> Envelope<Request, Response> {
    pub fn new(request: Request, reply_tx: Sender<Response>) -> Envelope<Request, Response> {
        Envelope { request, reply_tx }
    }

    /// Sends the response back to the caller. Fails if the caller stopped waiting.
    pub fn reply(self, response: Response) -> Result<(), ViewServiceError> {
        if let Err(err) = self.reply_tx.send(response) {
            return new_err("Cannot send response".to_string(), err.to_string());
        }

        Ok(())
    }
}

/// API abstraction for the communications with the view service.
pub trait ViewServiceRequestHandler: Clone + Sync + Send + 'static {
    /// Reports the server liveness and returns the committed view.
    fn heartbeat(&self, request: HeartbeatRequest) -> Result<HeartbeatResponse, ViewServiceError>;

    /// Returns the committed view.
    fn query(&self, request: QueryRequest) -> Result<QueryResponse, ViewServiceError>;

    /// Returns the primary of the committed view, if one is assigned.
    fn primary(&self) -> Result<Option<ServerId>, ViewServiceError> {
        let response = self.query(QueryRequest)?;

        Ok(response.view.primary)
    }
}

/// Abstraction for channels delivering requests to the view service.
pub trait ViewServiceRequestChannels: Send + Clone + 'static {
    /// Returns receiver channel for heartbeat requests.
    fn heartbeat_request_rx(&self) -> Receiver<Envelope<HeartbeatRequest, HeartbeatResponse>>;

    /// Returns receiver channel for query requests.
    fn query_request_rx(&self) -> Receiver<Envelope<QueryRequest, QueryResponse>>;
}

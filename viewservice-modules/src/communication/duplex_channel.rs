use crossbeam_channel::{Receiver, Sender};

use std::time::Duration;

use viewservice::{new_err, Envelope, ViewServiceError};

/// Create abstraction for the dual-end communication via channels. Every request carries
/// its own reply channel, so concurrent callers never receive each other's responses.
#[derive(Clone, Debug)]
pub struct DuplexChannel<Request, Response> {
    name: String,
    timeout_duration: Duration,

    /// Sender channel for the request.
    pub request_tx: Sender<Envelope<Request, Response>>,

    /// Receiver channel for the request.
    pub request_rx: Receiver<Envelope<Request, Response>>,
}

impl<Request, Response> DuplexChannel<Request, Response>
where
    Request: Send + 'static,
    Response: Send + 'static,
{
    /// Creates new DuplexChannel with the name and communication timeout on recv's and send's.
    pub fn new(name: String, timeout_duration: Duration) -> DuplexChannel<Request, Response> {
        let (request_tx, request_rx): (
            Sender<Envelope<Request, Response>>,
            Receiver<Envelope<Request, Response>>,
        ) = crossbeam_channel::bounded(0);

        DuplexChannel {
            timeout_duration,
            name,
            request_tx,
            request_rx,
        }
    }

    /// Returns the receiver channel for the request.
    pub fn request_rx(&self) -> Receiver<Envelope<Request, Response>> {
        self.request_rx.clone()
    }

    /// Sends request and gets response via channels.
    pub fn send_request(&self, request: Request) -> Result<Response, ViewServiceError> {
        let (reply_tx, reply_rx): (Sender<Response>, Receiver<Response>) =
            crossbeam_channel::bounded(1);

        let send_result = self
            .request_tx
            .send_timeout(Envelope::new(request, reply_tx), self.timeout_duration);
        if let Err(err) = send_result {
            return new_err(
                format!("Cannot send request. Channel : {} ", self.name),
                err.to_string(),
            );
        }

        match reply_rx.recv_timeout(self.timeout_duration) {
            Ok(response) => Ok(response),
            Err(err) => new_err(
                format!("Cannot receive response. Channel : {}", self.name),
                err.to_string(),
            ),
        }
    }
}

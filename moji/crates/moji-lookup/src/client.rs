//! Synchronous call interface to the lookup service.

use crossbeam_channel::{Receiver, Sender};

use crate::error::{LookupError, Result};
use crate::message::{Reply, Request, Status};
use crate::resolver::LookupContext;
use crate::token::Token;

/// Caller side of the request/reply channel pair.
///
/// Replies are correlated by order, so a client must have a single user.
/// `call` takes `&mut self` and `Client` is not `Clone`, which keeps that
/// true without a lock. Dropping the client shuts the service down.
#[derive(Debug)]
pub struct Client {
    requests: Sender<Request>,
    replies: Receiver<Reply>,
}

impl Client {
    pub(crate) fn new(requests: Sender<Request>, replies: Receiver<Reply>) -> Self {
        Self { requests, replies }
    }

    /// Sends one request and blocks for its reply.
    ///
    /// Returns the symbol or the unresolved placeholder. A failed reference
    /// table or a vanished worker is an error.
    pub fn call(&mut self, token: Token, context: &LookupContext) -> Result<String> {
        let request = Request {
            token,
            context: context.clone(),
        };
        self.requests
            .send(request)
            .map_err(|_| LookupError::ServiceStopped)?;

        let reply = self
            .replies
            .recv()
            .map_err(|_| LookupError::ServiceStopped)?;

        match reply.status {
            Status::Resolved | Status::Unresolved => Ok(reply.value),
            Status::Failed => Err(LookupError::SourceUnavailable(reply.value)),
        }
    }
}

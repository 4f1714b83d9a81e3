//! Messages exchanged between the client and the lookup service.

use crate::resolver::LookupContext;
use crate::token::Token;

/// A lookup request. Replies carry no id; they are matched by order.
#[derive(Debug, Clone)]
pub struct Request {
    /// Token to resolve.
    pub token: Token,
    /// Opaque data forwarded to the resolver.
    pub context: LookupContext,
}

/// How a request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `value` is the resolved symbol.
    Resolved,
    /// `value` is the placeholder for a token with no match.
    Unresolved,
    /// `value` describes why the reference table could not be read.
    Failed,
}

/// The reply to exactly one [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Outcome of the request.
    pub status: Status,
    /// Symbol, placeholder, or failure reason depending on `status`.
    pub value: String,
}

impl Reply {
    pub(crate) fn new(status: Status, value: impl Into<String>) -> Self {
        Self {
            status,
            value: value.into(),
        }
    }
}

//! Error types for the lookup layer.
//!
//! Two enums live here. [`ResolveError`] is what a [`Resolver`](crate::Resolver)
//! hands back to the service; [`LookupError`] is what callers of the
//! [`Client`](crate::Client) see.
//!
//! # Fatality
//!
//! - `ResolveError::NotFound` never reaches a caller. The service turns it
//!   into a cached placeholder.
//! - Every [`LookupError`] except `InvalidToken` means the reference source
//!   or the worker is gone, and the scan has to stop.

use thiserror::Error;

/// Outcome of a failed resolution against the reference table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No entry matches the description. Expected and cacheable.
    #[error("no symbol matches the description")]
    NotFound,

    /// The reference table could not be read or parsed.
    #[error("reference table unavailable: {0}")]
    SourceUnavailable(String),
}

/// Error returned by the lookup client.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The text is not a well-formed short code.
    #[error("invalid short code {0:?}: expected [a-z_-]+")]
    InvalidToken(String),

    /// The reference table failed for this request.
    #[error("reference table unavailable: {0}")]
    SourceUnavailable(String),

    /// The lookup worker stopped while a request was outstanding.
    #[error("lookup service stopped before replying")]
    ServiceStopped,

    /// The lookup worker thread could not be started.
    #[error("failed to start lookup service: {0}")]
    Spawn(#[from] std::io::Error),

    /// The lookup worker thread panicked.
    #[error("lookup service panicked")]
    ServicePanicked,
}

impl LookupError {
    /// Returns true when the error must abort the whole scan.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LookupError::InvalidToken(_))
    }
}

/// Result type alias using LookupError.
pub type Result<T> = std::result::Result<T, LookupError>;

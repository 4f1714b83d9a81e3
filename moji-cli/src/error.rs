//! Error handling module for the moji CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the moji CLI application.
///
/// Every variant is fatal: `main` prints it to stderr and exits non-zero.
#[derive(Error, Debug)]
pub enum MojiError {
    /// Error when configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when the reference table cannot be provisioned.
    #[error("Provisioning failed: {0}")]
    Provision(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when the lookup service cannot be started or stopped.
    #[error(transparent)]
    Lookup(#[from] moji_lookup::LookupError),

    /// Error raised while scanning input.
    #[error(transparent)]
    Scan(#[from] moji_scan::ScanError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using MojiError.
pub type Result<T> = std::result::Result<T, MojiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = MojiError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_provision_error_display() {
        let err = MojiError::Provision("HTTP 404".to_string());
        assert_eq!(err.to_string(), "Provisioning failed: HTTP 404");
    }

    #[test]
    fn test_validation_error_display() {
        let err = MojiError::Validation("invalid delimiter".to_string());
        assert_eq!(err.to_string(), "Validation error: invalid delimiter");
    }

    #[test]
    fn test_lookup_error_is_transparent() {
        let err: MojiError = moji_lookup::LookupError::ServiceStopped.into();
        assert_eq!(err.to_string(), "lookup service stopped before replying");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MojiError = io_err.into();
        assert!(matches!(err, MojiError::Io(_)));
    }
}

//! Scanner errors.

use std::io;

use moji_lookup::LookupError;
use thiserror::Error;

/// Error that stops a scan.
///
/// Malformed and unresolvable tokens are not errors; they show up only in
/// the output.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The lookup for the token opening at `line`:`column` failed fatally.
    #[error("lookup failed for token at {line}:{column}: {source}")]
    Lookup {
        /// Line of the token's opening delimiter.
        line: u32,
        /// Column of the token's opening delimiter.
        column: u32,
        /// Underlying lookup error.
        #[source]
        source: LookupError,
    },

    /// The scanner configuration is invalid.
    #[error("invalid scanner configuration: {0}")]
    Config(String),
}

/// Result type alias using ScanError.
pub type Result<T> = std::result::Result<T, ScanError>;

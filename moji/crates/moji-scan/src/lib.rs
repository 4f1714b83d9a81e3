//! moji-scan - Streaming short-code scanner
//!
//! This crate scans a byte stream for delimited short codes such as
//! `:thumbs_up:` and replaces each with the symbol returned by a
//! [`moji_lookup::Client`]. Everything else is copied through unchanged.
//!
//! # Example Usage
//!
//! ```
//! use moji_lookup::{spawn, LookupContext, ResolveError};
//! use moji_scan::{ScanConfig, Scanner};
//!
//! let resolver = |description: &str, _: &LookupContext| match description {
//!     "waving hand" => Ok("👋".to_string()),
//!     _ => Err(ResolveError::NotFound),
//! };
//! let (mut client, _handle) = spawn(resolver).unwrap();
//!
//! let ctx = LookupContext::new("annotations.json");
//! let mut scanner = Scanner::new(&mut client, ctx, ScanConfig::default()).unwrap();
//! let mut out = Vec::new();
//! scanner.scan("hi :waving_hand: :nope: :open".as_bytes(), &mut out).unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "hi 👋 ?nope? :open");
//! ```
//!
//! # Module Structure
//!
//! - [`cursor`] - Byte cursor over a buffered reader
//! - [`scanner`] - The passthrough/accumulate state machine
//! - [`config`] - Delimiter settings
//! - [`error`] - Error types
//!
//! # Token Rules
//!
//! - A token is `[a-z_-]+` between two delimiters (`:` by default).
//! - Any other byte inside a candidate token abandons it; the candidate is
//!   written out unchanged. So does a candidate longer than
//!   [`ScanConfig::max_token_len`].
//! - A candidate still open at end of input is written out unchanged.
//! - Underscores become spaces in the description sent for lookup.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod cursor;
pub mod error;
pub mod scanner;

#[cfg(test)]
mod edge_cases;

pub use config::{ScanConfig, DEFAULT_DELIMITER, DEFAULT_MAX_TOKEN_LEN};
pub use cursor::Cursor;
pub use error::{Result, ScanError};
pub use scanner::{ScanSummary, Scanner};

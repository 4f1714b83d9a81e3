//! Command modules for the moji CLI.
//!
//! Each subcommand lives in its own file and implements
//! [`traits::Command`].

pub mod common;
pub mod traits;

pub mod fetch;
pub mod scan;

// Re-export command types and functions
pub use fetch::{FetchArgs, FetchCommand};
pub use scan::{ScanArgs, ScanCommand};
pub use traits::dispatch;

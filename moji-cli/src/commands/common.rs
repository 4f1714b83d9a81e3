//! Common types and utilities for moji commands.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{MojiError, Result};

/// Input path that stands for standard input.
pub const STDIN_MARKER: &str = "-";

/// Standard error message templates.
pub mod error_messages {
    /// The reference table is missing and fetching is disabled.
    pub const TABLE_NOT_FOUND: &str = "reference table not found at";

    /// Hint appended to `TABLE_NOT_FOUND`.
    pub const FETCH_HINT: &str = "run `moji fetch` or pass --table";

    /// An input file could not be opened.
    pub const INPUT_UNREADABLE: &str = "cannot open input";
}

/// Opens `path` for buffered reading, `-` meaning standard input.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIN_MARKER {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path).map_err(|e| {
        MojiError::Validation(format!(
            "{} {}: {}",
            error_messages::INPUT_UNREADABLE,
            path.display(),
            e
        ))
    })?;
    Ok(Box::new(BufReader::new(file)))
}

//! Scanner configuration.

use moji_lookup::is_shortcode_char;

use crate::error::{Result, ScanError};

/// Default token delimiter.
pub const DEFAULT_DELIMITER: u8 = b':';

/// Default cap on the length of a candidate token. The longest CLDR
/// text-to-speech names are well under this.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 256;

/// Settings for a [`Scanner`](crate::Scanner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Byte that opens and closes a token.
    pub delimiter: u8,
    /// Longest candidate the scanner buffers. A longer run of token bytes
    /// is abandoned and written through unchanged.
    pub max_token_len: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }
}

impl ScanConfig {
    /// Builds a configuration from a delimiter character.
    pub fn with_delimiter(delimiter: char) -> Result<Self> {
        let byte = u8::try_from(delimiter).map_err(|_| {
            ScanError::Config(format!("delimiter {delimiter:?} is not an ASCII character"))
        })?;
        let config = Self {
            delimiter: byte,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the delimiter can be told apart from token text.
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(ScanError::Config(format!(
                "delimiter byte {:#04x} is not ASCII",
                self.delimiter
            )));
        }
        if is_shortcode_char(self.delimiter) {
            return Err(ScanError::Config(format!(
                "delimiter {:?} is part of the short-code alphabet",
                self.delimiter as char
            )));
        }
        if self.max_token_len == 0 {
            return Err(ScanError::Config(
                "maximum token length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

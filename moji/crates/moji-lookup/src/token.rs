//! Short-code tokens.
//!
//! A token is the text between two delimiters, e.g. `thumbs_up` in
//! `:thumbs_up:`. It has two faces: the display form keeps underscores and
//! is used as the cache key and in placeholders, the description form maps
//! underscores to spaces and is what the reference table is queried with.

use std::fmt;

use crate::error::{LookupError, Result};

/// Opening marker of the unresolved placeholder.
pub const PLACEHOLDER_OPEN: char = '?';

/// Closing marker of the unresolved placeholder.
pub const PLACEHOLDER_CLOSE: char = '?';

/// Returns true if `b` belongs to the short-code alphabet `[a-z_-]`.
#[inline]
pub fn is_shortcode_char(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'_' || b == b'-'
}

/// A validated short code.
///
/// # Example
///
/// ```
/// use moji_lookup::Token;
///
/// let token = Token::new("blue_heart").unwrap();
/// assert_eq!(token.as_str(), "blue_heart");
/// assert_eq!(token.description(), "blue heart");
/// assert_eq!(token.placeholder(), "?blue_heart?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Validates `text` against the short-code alphabet.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() || !text.bytes().all(is_shortcode_char) {
            return Err(LookupError::InvalidToken(text));
        }
        Ok(Self(text))
    }

    /// The display form, underscores preserved.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical description handed to the resolver.
    pub fn description(&self) -> String {
        self.0.replace('_', " ")
    }

    /// The rendering used when no symbol matches.
    pub fn placeholder(&self) -> String {
        format!("{}{}{}", PLACEHOLDER_OPEN, self.0, PLACEHOLDER_CLOSE)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

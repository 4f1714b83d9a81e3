//! Single-pass short-code scanner.
//!
//! The scanner copies its input to its output byte by byte and replaces
//! every `:token:` span with whatever the lookup client returns for it.
//!
//! # States
//!
//! ```text
//!              delimiter                    alphabet byte
//!  Passthrough ─────────▶ Accumulating ◀────────────────┐
//!       ▲                   │   │  └─────────────────────┘
//!       │   delimiter       │   │ other byte
//!       │   (resolve, emit) │   │ (emit delimiter + text + byte)
//!       └───────────────────┘───┘
//! ```
//!
//! Two delimiters in a row emit the first and start over on the second.
//! An unterminated token at end of input is flushed verbatim, and so is a
//! candidate that grows past [`ScanConfig::max_token_len`].

use std::io::{BufRead, Write};

use moji_lookup::{is_shortcode_char, Client, LookupContext, Token};

use crate::config::ScanConfig;
use crate::cursor::Cursor;
use crate::error::{Result, ScanError};

/// Counters for one [`Scanner::scan`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Input bytes consumed.
    pub bytes_read: u64,
    /// Complete tokens sent to the lookup service.
    pub tokens: u64,
    /// Candidate tokens abandoned by a byte outside the alphabet.
    pub abandoned: u64,
    /// Candidate tokens still open at end of input.
    pub unterminated: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Passthrough,
    /// Inside a candidate token that opened at `line`:`column`.
    Accumulating { line: u32, column: u32 },
}

/// Streaming scanner bound to one lookup client.
pub struct Scanner<'c> {
    client: &'c mut Client,
    context: LookupContext,
    config: ScanConfig,
    token: String,
}

impl<'c> Scanner<'c> {
    /// Creates a scanner that resolves tokens through `client` against
    /// `context`.
    pub fn new(client: &'c mut Client, context: LookupContext, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            context,
            config,
            token: String::new(),
        })
    }

    /// Scans `reader` to `writer` until end of input.
    ///
    /// The writer is flushed whenever the reader runs dry, so interactive
    /// input is echoed without waiting for more. On a fatal lookup error,
    /// everything before the failing token has been written and flushed and
    /// nothing after it is.
    pub fn scan<R, W>(&mut self, reader: R, writer: &mut W) -> Result<ScanSummary>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let delimiter = self.config.delimiter;
        let mut cursor = Cursor::new(reader);
        let mut summary = ScanSummary::default();
        let mut state = State::Passthrough;

        loop {
            if cursor.needs_refill() {
                writer.flush()?;
            }
            let (line, column) = (cursor.line(), cursor.column());
            let Some(byte) = cursor.bump()? else {
                break;
            };

            state = match state {
                State::Passthrough if byte == delimiter => {
                    self.token.clear();
                    State::Accumulating { line, column }
                }
                State::Passthrough => {
                    writer.write_all(&[byte])?;
                    State::Passthrough
                }
                State::Accumulating { .. }
                    if is_shortcode_char(byte) && self.token.len() < self.config.max_token_len =>
                {
                    self.token.push(byte as char);
                    state
                }
                State::Accumulating { line, column } if is_shortcode_char(byte) => {
                    log::debug!(
                        "candidate token at {}:{} exceeds {} bytes, passing through",
                        line,
                        column,
                        self.config.max_token_len
                    );
                    writer.write_all(&[delimiter])?;
                    writer.write_all(self.token.as_bytes())?;
                    writer.write_all(&[byte])?;
                    summary.abandoned += 1;
                    State::Passthrough
                }
                State::Accumulating { .. } if byte == delimiter && self.token.is_empty() => {
                    writer.write_all(&[delimiter])?;
                    summary.abandoned += 1;
                    State::Accumulating { line, column }
                }
                State::Accumulating { line, column } if byte == delimiter => {
                    if let Err(e) = self.emit_token(writer, line, column) {
                        // The lookup error wins over a failed flush.
                        if let Err(flush) = writer.flush() {
                            log::debug!("flush after failed lookup: {}", flush);
                        }
                        return Err(e);
                    }
                    summary.tokens += 1;
                    State::Passthrough
                }
                State::Accumulating { .. } => {
                    log::trace!("abandoned candidate token {:?} at {}:{}", self.token, line, column);
                    writer.write_all(&[delimiter])?;
                    writer.write_all(self.token.as_bytes())?;
                    writer.write_all(&[byte])?;
                    summary.abandoned += 1;
                    State::Passthrough
                }
            };
        }

        if let State::Accumulating { line, column } = state {
            log::debug!("unterminated token {:?} at {}:{}", self.token, line, column);
            writer.write_all(&[delimiter])?;
            writer.write_all(self.token.as_bytes())?;
            summary.unterminated += 1;
        }

        writer.flush()?;
        summary.bytes_read = cursor.position();
        Ok(summary)
    }

    fn emit_token<W>(&mut self, writer: &mut W, line: u32, column: u32) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let lookup_failed = |source| ScanError::Lookup {
            line,
            column,
            source,
        };

        let token = Token::new(self.token.as_str()).map_err(lookup_failed)?;
        let value = self
            .client
            .call(token, &self.context)
            .map_err(lookup_failed)?;
        writer.write_all(value.as_bytes())?;
        Ok(())
    }
}

//! Byte cursor over a buffered input stream.
//!
//! The cursor pulls one byte at a time from any [`BufRead`] without ever
//! holding more than the reader's own buffer. It tracks line and column so
//! errors can point at the offending token. Columns count characters, not
//! bytes: UTF-8 continuation bytes do not advance the column.

use std::io::{self, BufRead};

/// A streaming cursor over `R`.
///
/// # Example
///
/// ```
/// use moji_scan::Cursor;
///
/// let mut cursor = Cursor::new("a\nb".as_bytes());
/// assert_eq!(cursor.bump().unwrap(), Some(b'a'));
/// assert_eq!(cursor.bump().unwrap(), Some(b'\n'));
/// assert_eq!(cursor.line(), 2);
/// assert_eq!(cursor.bump().unwrap(), Some(b'b'));
/// assert_eq!(cursor.bump().unwrap(), None);
/// ```
pub struct Cursor<R> {
    /// The underlying reader.
    reader: R,

    /// Bytes consumed so far.
    position: u64,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based, in characters).
    column: u32,

    /// Bytes left in the chunk the reader last handed out.
    pending: usize,
}

impl<R: BufRead> Cursor<R> {
    /// Creates a cursor at the start of `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            line: 1,
            column: 1,
            pending: 0,
        }
    }

    /// Consumes and returns the next byte, or `None` at end of stream.
    ///
    /// Blocks when the reader has nothing buffered. Interrupted reads are
    /// retried.
    pub fn bump(&mut self) -> io::Result<Option<u8>> {
        let (byte, available) = loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => break (buf[0], buf.len()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.reader.consume(1);
        self.pending = available - 1;
        self.position += 1;

        // Positions saturate; a pathological line must not abort the scan.
        if byte == b'\n' {
            self.line = self.line.saturating_add(1);
            self.column = 1;
        } else if !is_continuation_byte(byte) {
            self.column = self.column.saturating_add(1);
        }

        Ok(Some(byte))
    }

    /// Returns true when the next [`bump`](Self::bump) may block on the
    /// underlying reader.
    #[inline]
    pub fn needs_refill(&self) -> bool {
        self.pending == 0
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }
}

#[inline]
fn is_continuation_byte(b: u8) -> bool {
    b & 0xC0 == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn drain<R: BufRead>(cursor: &mut Cursor<R>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(b) = cursor.bump().unwrap() {
            out.push(b);
        }
        out
    }

    #[test]
    fn test_reads_every_byte() {
        let mut cursor = Cursor::new("héllo 👋".as_bytes());
        assert_eq!(drain(&mut cursor), "héllo 👋".as_bytes());
        assert_eq!(cursor.position(), "héllo 👋".len() as u64);
    }

    #[test]
    fn test_empty_input() {
        let mut cursor = Cursor::new(&b""[..]);
        assert_eq!(cursor.bump().unwrap(), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_line_tracking() {
        let mut cursor = Cursor::new("ab\ncd\n\ne".as_bytes());
        drain(&mut cursor);
        assert_eq!(cursor.line(), 4);
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn test_column_counts_characters() {
        let mut cursor = Cursor::new("é👋x".as_bytes());
        drain(&mut cursor);
        assert_eq!(cursor.column(), 4);
    }

    #[test]
    fn test_positions_saturate() {
        let mut cursor = Cursor::new("ab\n\nc".as_bytes());
        cursor.column = u32::MAX - 1;
        cursor.bump().unwrap();
        cursor.bump().unwrap();
        assert_eq!(cursor.column(), u32::MAX);

        cursor.line = u32::MAX;
        cursor.bump().unwrap();
        cursor.bump().unwrap();
        assert_eq!(cursor.line(), u32::MAX);
        assert_eq!(cursor.column(), 1);
        cursor.bump().unwrap();
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn test_needs_refill_at_chunk_boundary() {
        let reader = BufReader::with_capacity(2, "abc".as_bytes());
        let mut cursor = Cursor::new(reader);
        assert!(cursor.needs_refill());

        cursor.bump().unwrap();
        assert!(!cursor.needs_refill());
        cursor.bump().unwrap();
        assert!(cursor.needs_refill());
        cursor.bump().unwrap();
        assert!(cursor.needs_refill());
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        struct Flaky {
            interrupted: bool,
            data: &'static [u8],
        }

        impl io::Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                io::Read::read(&mut self.data, buf)
            }
        }

        let reader = BufReader::new(Flaky {
            interrupted: false,
            data: b"ok",
        });
        let mut cursor = Cursor::new(reader);
        assert_eq!(drain(&mut cursor), b"ok");
    }
}

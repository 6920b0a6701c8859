//! Delimited reads: lines and null terminated strings.

use crate::read::Source;
use crate::{Error, Result, Stream};

/// The outcome of [`Stream::read_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// End of input was reached before any byte was read.
    Eof,
    /// A full line of this many bytes; its terminator (if any) was consumed.
    ///
    /// An empty line is `Complete(0)`, never [`Line::Eof`].
    Complete(usize),
    /// The destination filled up after this many bytes while the line went on.
    ///
    /// The rest of the line is left in the stream. A terminator arriving right when the
    /// destination is full still yields [`Line::Complete`].
    Truncated(usize),
}

impl Line {
    /// Returns the number of bytes written, ignoring how the line ended.
    pub const fn len(&self) -> usize {
        match self {
            Self::Eof => 0,
            Self::Complete(n) | Self::Truncated(n) => *n,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Source> Stream<S> {
    /// Reads one line into `buf`, stopping at `\n`, `\r`, `\r\n` or end of input.
    ///
    /// At most `buf.len() - 1` bytes are stored, leaving room for the `0` that is written after
    /// the last byte. Terminators are consumed but never stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use pull_stream::{Line, ReadSource, Stream};
    ///
    /// let mut stream = Stream::new(ReadSource::new(&b"abc\r\ndef"[..]));
    /// let mut buf = [0u8; 16];
    ///
    /// assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    /// assert_eq!(&buf[..4], b"abc\0");
    /// assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Complete(3));
    /// assert_eq!(stream.read_line(&mut buf).unwrap(), Line::Eof);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns whatever error the source raised.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Bounded by limit"
    )]
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<Line> {
        let limit = buf.len().saturating_sub(1);
        let mut count = 0;

        let line = loop {
            match self.read_byte()? {
                None if count == 0 => break Line::Eof,
                None | Some(b'\n') => break Line::Complete(count),
                Some(b'\r') => {
                    // Fold a following \n into the same terminator
                    if self.peek_byte()? == Some(b'\n') {
                        self.read_byte()?;
                    }
                    break Line::Complete(count);
                }
                Some(_) if count >= limit => {
                    // Leave the byte for the next read
                    self.unread_byte();
                    break Line::Truncated(count);
                }
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
            }
        };

        if let Some(slot) = buf.get_mut(count) {
            *slot = 0;
        }

        Ok(line)
    }

    /// Reads a null terminated string into `buf`, returning the bytes before the terminator.
    ///
    /// The terminator is stored in `buf` too, so `buf` must be at least one byte longer than the
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferOverrun`] if `buf` fills up before the terminator, and
    /// [`Error::UnexpectedEof`] if input ends first. Neither case truncates silently.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "len stays within buf"
    )]
    pub fn read_string<'b>(&mut self, buf: &'b mut [u8]) -> Result<&'b [u8]> {
        let mut len = 0;

        while let Some(slot) = buf.get_mut(len) {
            let byte = self.read_byte()?.ok_or(Error::UnexpectedEof {
                what: "null terminated string",
            })?;
            *slot = byte;

            if byte == 0 {
                return Ok(&buf[..len]);
            }
            len += 1;
        }

        Err(Error::BufferOverrun)
    }
}

#[cfg(test)]
mod tests;

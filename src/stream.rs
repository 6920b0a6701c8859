use std::cmp;
use std::io::{self, BufRead, Read, SeekFrom};

use crate::buffer::Buffer;
use crate::constants::{BOMB_FLOOR, BOMB_RATIO, CHUNK_SIZE, SKIP_SCRATCH_SIZE};
use crate::ingest::IngestLimits;
use crate::read::{MetaQuery, MetaValue, Source};
use crate::{Error, Result};

/// A buffered, pull-based reader over a [`Source`].
///
/// The stream keeps a window of already fetched bytes. The window's read position is the cursor
/// every read advances; when it runs dry the stream pulls the next batch from the source.
///
/// A stream serves exactly one reader at a time. Nothing inside it is synchronised.
///
/// # Invariants
///
/// `pos` is the absolute offset one past the last byte fetched into the window, so the logical
/// offset is always `pos - window.remaining()`.
#[derive(Debug)]
pub struct Stream<S> {
    source: S,
    window: Buffer,
    /// Absolute offset of the end of the window.
    pos: u64,
    eof: bool,
    /// Low `avail` bits of this byte are still unread by [`read_bits`](Stream::read_bits).
    bits: u8,
    avail: u32,
    limits: IngestLimits,
}

impl<S: Source> Stream<S> {
    /// Creates a new `Stream` with default configuration.
    ///
    /// The window holds [`CHUNK_SIZE`] bytes and ingestion uses the default bomb limits.
    pub fn new(source: S) -> Stream<S> {
        Stream::builder(source).build()
    }

    /// Returns a [`StreamBuilder`] for configuring a new `Stream`.
    pub fn builder(source: S) -> StreamBuilder<S> {
        StreamBuilder {
            source,
            window_capacity: None,
            bomb_floor: BOMB_FLOOR,
            bomb_ratio: BOMB_RATIO,
        }
    }
}

/// A builder for constructing a [`Stream`] with custom window and ingestion settings.
#[must_use]
pub struct StreamBuilder<S> {
    source: S,
    window_capacity: Option<usize>,
    bomb_floor: usize,
    bomb_ratio: usize,
}

impl<S: Source> StreamBuilder<S> {
    /// Sets the window capacity. Defaults to [`CHUNK_SIZE`].
    pub fn window_capacity(mut self, cap: usize) -> Self {
        self.window_capacity = Some(cap);
        self
    }

    /// Sets the length below which the bomb check never fires. Defaults to [`BOMB_FLOOR`].
    pub fn bomb_floor(mut self, floor: usize) -> Self {
        self.bomb_floor = floor;
        self
    }

    /// Sets the tolerated expansion over the size hint. Defaults to [`BOMB_RATIO`].
    ///
    /// A ratio of 0 is raised to 1 when the stream is built.
    pub fn bomb_ratio(mut self, ratio: usize) -> Self {
        self.bomb_ratio = ratio;
        self
    }

    /// Builds the [`Stream`] with the configured settings.
    pub fn build(self) -> Stream<S> {
        let window = Buffer::with_capacity(self.window_capacity.unwrap_or(CHUNK_SIZE));

        Stream {
            source: self.source,
            window,
            pos: 0,
            eof: false,
            bits: 0,
            avail: 0,
            limits: IngestLimits::new(self.bomb_floor, self.bomb_ratio),
        }
    }
}

impl<S> Stream<S> {
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Unwraps the source. Bytes still in the window are lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    pub fn limits(&self) -> IngestLimits {
        self.limits
    }

    /// Returns the current logical offset within the source.
    #[inline]
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    pub fn tell(&self) -> u64 {
        self.pos - self.window.remaining() as u64
    }

    /// Discards any partially consumed byte left over from [`read_bits`](Stream::read_bits).
    #[inline]
    pub fn sync_bits(&mut self) {
        self.avail = 0;
    }

    /// Steps back over the last byte read, if it is still in the window.
    pub fn unread_byte(&mut self) {
        self.window.unconsume(1);
    }
}

impl<S: Source> Stream<S> {
    /// Returns how many bytes can be read right now without another pull, capped at `max`.
    ///
    /// When the window is empty this pulls once from the source, which may block. `Ok(0)` means
    /// end of input.
    ///
    /// # Errors
    ///
    /// Returns whatever error the source raised.
    #[expect(clippy::arithmetic_side_effects, reason = "Would OOM before overflow")]
    pub fn available(&mut self, max: usize) -> Result<usize> {
        if self.window.remaining() == 0 && !self.eof && max > 0 {
            // We've consumed all the data we have
            self.window.clear();

            let bytes_read = self.window.fill(&mut self.source)?;
            if bytes_read == 0 {
                self.eof = true;
            }
            self.pos += bytes_read as u64;
            log::trace!("pulled {bytes_read} bytes, stream now at {}", self.pos);
        }

        Ok(cmp::min(self.window.remaining(), max))
    }

    /// Copies what the window holds into `buf`, pulling at most once if the window is empty.
    ///
    /// Returns fewer than `buf.len()` bytes whenever the window runs dry, and `Ok(0)` at end of
    /// input. Bytes are committed to `buf` before any further pull, so an error never loses
    /// data that was already copied.
    ///
    /// # Errors
    ///
    /// Returns whatever error the source raised.
    #[expect(clippy::indexing_slicing, reason = "Bounded by available()")]
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.available(buf.len())?;

        buf[..n].copy_from_slice(&self.window.unconsumed()[..n]);
        self.window.consume(n);

        Ok(n)
    }

    /// Reads up to `buf.len()` bytes, returning how many were copied.
    ///
    /// A short count only happens at end of input, which is not an error.
    ///
    /// # Errors
    ///
    /// Returns whatever error the source raised.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "count never exceeds buf.len()"
    )]
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut count = 0;

        while count < buf.len() {
            let n = self.read_chunk(&mut buf[count..])?;
            if n == 0 {
                break;
            }
            count += n;
        }

        Ok(count)
    }

    /// Reads one byte, or `None` at end of input.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.window.consume(1);
        }
        Ok(byte)
    }

    /// Returns the next byte without consuming it, or `None` at end of input.
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        self.available(1)?;
        Ok(self.window.unconsumed().first().copied())
    }

    /// Returns `true` when no more bytes can be read.
    pub fn is_eof(&mut self) -> Result<bool> {
        Ok(self.available(1)? == 0)
    }

    /// Discards up to `len` bytes, returning how many were actually discarded.
    ///
    /// Stops early at end of input without raising an error.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing,
        reason = "Chunks never exceed the scratch size or what is left"
    )]
    pub fn skip(&mut self, mut len: usize) -> Result<usize> {
        let mut scratch = [0u8; SKIP_SCRATCH_SIZE];
        let mut total = 0;

        while len > 0 {
            let chunk = cmp::min(len, scratch.len());
            let count = self.read(&mut scratch[..chunk])?;
            total += count;
            if count < chunk {
                break;
            }
            len -= count;
        }

        Ok(total)
    }

    /// Repositions the stream and returns the new logical offset.
    ///
    /// Bit reading state is always discarded. With a seekable source the seek is delegated and
    /// the window is dropped. Without one, forward seeks discard bytes one at a time while
    /// backward seeks and seeks from the end are refused with a warning and change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeek`] if a relative seek on a seekable source lands before the
    /// start, plus any error the source raised.
    #[expect(clippy::arithmetic_side_effects, reason = "Offsets are widened to i128")]
    pub fn seek(&mut self, to: SeekFrom) -> Result<u64> {
        self.sync_bits();

        if self.source.is_seekable() {
            let to = match to {
                SeekFrom::Current(offset) => SeekFrom::Start(self.resolve(offset)?),
                other => other,
            };
            let offset = self.source.seek(to)?;
            self.window.clear();
            self.pos = offset;
            self.eof = false;
            return Ok(offset);
        }

        let delta = match to {
            SeekFrom::Start(offset) => i128::from(offset) - i128::from(self.tell()),
            SeekFrom::Current(offset) => i128::from(offset),
            SeekFrom::End(_) => {
                log::warn!("cannot seek");
                return Ok(self.tell());
            }
        };

        if delta < 0 {
            log::warn!("cannot seek backwards");
            return Ok(self.tell());
        }

        // Slow, but sources without native seek rarely need it
        for _ in 0..delta {
            if self.read_byte()?.is_none() {
                log::warn!("seek failed");
                break;
            }
        }

        Ok(self.tell())
    }

    fn resolve(&self, offset: i64) -> Result<u64> {
        let current = i128::from(self.tell());
        let target = current.saturating_add(i128::from(offset));

        u64::try_from(target)
            .map_err(|_| Error::InvalidSeek(i64::try_from(target).unwrap_or(i64::MIN)))
    }

    /// Reads `n` bits, most significant first.
    ///
    /// Bits left over from a partially read byte are used before any new byte is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShortRead`] if input ends before `n` bits were read.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than 32.
    #[expect(clippy::arithmetic_side_effects, reason = "Bit counts stay within 32")]
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        assert!(n <= 32, "cannot read more than 32 bits at once");

        if n == 0 {
            return Ok(0);
        }

        if n <= self.avail {
            self.avail -= n;
            return Ok((u32::from(self.bits) >> self.avail) & low_mask(n));
        }

        let mut x = u32::from(self.bits) & low_mask(self.avail);
        let mut n = n - self.avail;
        self.avail = 0;

        while n >= 8 {
            let byte = self.read_bits_byte()?;
            x = (x << 8) | u32::from(byte);
            n -= 8;
        }

        if n > 0 {
            self.bits = self.read_bits_byte()?;
            self.avail = 8 - n;
            x = (x << n) | (u32::from(self.bits) >> self.avail);
        }

        Ok(x)
    }

    fn read_bits_byte(&mut self) -> Result<u8> {
        self.read_byte()?.ok_or(Error::ShortRead { what: "bit field" })
    }

    /// Queries the source for a capability, `None` if unsupported.
    pub fn meta(&mut self, query: MetaQuery) -> Option<MetaValue> {
        self.source.meta(query)
    }
}

/// Mask with the low `n` bits set, for `n < 32`.
#[inline]
#[expect(clippy::arithmetic_side_effects, reason = "Callers keep n below 32")]
fn low_mask(n: u32) -> u32 {
    (1 << n) - 1
}

impl<S: Source> Read for Stream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_chunk(buf)?)
    }
}

impl<S: Source> BufRead for Stream<S> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.available(usize::MAX)?;

        // Return the unconsumed data we have
        Ok(self.window.unconsumed())
    }

    fn consume(&mut self, amt: usize) {
        self.window.consume(amt);
    }
}

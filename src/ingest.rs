//! Draining a stream into an owned buffer.
//!
//! Ingestion pulls everything a stream has left into a freshly allocated [`Buffer`] that grows
//! geometrically. When the caller declares an expected size, the loop also watches for a source
//! that inflates far past it (a compression bomb) and stops before memory runs out.
//!
//! # Example
//!
//! ```
//! use pull_stream::{IngestMode, ReadSource, Stream};
//!
//! let mut stream = Stream::new(ReadSource::new(&b"Hello, World!"[..]));
//! let ingested = stream.ingest(0, IngestMode::Tolerant).unwrap();
//! assert_eq!(ingested.data, b"Hello, World!");
//! assert!(!ingested.truncated);
//! ```

use std::path::Path;

use crate::buffer::Buffer;
use crate::constants::{BOMB_FLOOR, BOMB_RATIO, MIN_INGEST_CAPACITY};
use crate::read::Source;
use crate::source::open_file;
use crate::{Error, Result, Stream};

/// How ingestion treats a failure part way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestMode {
    /// Discard the partial data and return the error.
    Strict,
    /// Keep the partial data and flag it as truncated.
    ///
    /// [`Error::Cancelled`] still propagates.
    Tolerant,
}

/// The outcome of a successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    pub data: Vec<u8>,
    /// `true` if a tolerant ingestion stopped on an error rather than at end of input.
    pub truncated: bool,
}

/// Thresholds for the compression bomb check.
///
/// The check only runs when a size hint was given. It fires once the accumulated length has
/// reached `floor` and exceeds `ratio` times the hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    floor: usize,
    ratio: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self::new(BOMB_FLOOR, BOMB_RATIO)
    }
}

impl IngestLimits {
    /// Creates limits with the given floor and ratio. A `ratio` of 0 is raised to 1.
    pub fn new(floor: usize, ratio: usize) -> Self {
        Self {
            floor,
            ratio: ratio.max(1),
        }
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn ratio(&self) -> usize {
        self.ratio
    }

    /// Returns `true` if `len` bytes read against a non-zero `hint` looks like a bomb.
    pub fn is_bomb(&self, len: usize, hint: usize) -> bool {
        hint > 0
            && len >= self.floor
            && len.checked_div(self.ratio).is_some_and(|scaled| scaled > hint)
    }
}

impl<S: Source> Stream<S> {
    /// Reads the rest of the stream into an owned buffer.
    ///
    /// `hint` is the expected size, or 0 if unknown. The buffer starts at
    /// `max(hint, MIN_INGEST_CAPACITY) + 1` bytes and doubles whenever it fills up. The hint
    /// often comes from untrusted input, so a capacity that cannot be allocated is an ordinary
    /// [`Error::OutOfMemory`].
    ///
    /// # Errors
    ///
    /// In [`IngestMode::Strict`] any error is returned and the partial data dropped, including
    /// [`Error::CompressionBomb`] when a non-zero `hint` is exceeded by the configured ratio. In
    /// [`IngestMode::Tolerant`] only [`Error::Cancelled`] is returned; every other error ends the
    /// read with [`Ingested::truncated`] set.
    pub fn ingest(&mut self, hint: usize, mode: IngestMode) -> Result<Ingested> {
        let capacity = hint.max(MIN_INGEST_CAPACITY).saturating_add(1);

        let (data, result) = match Buffer::try_with_capacity(capacity) {
            Ok(mut buffer) => {
                let result = self.ingest_into(&mut buffer, hint);
                (buffer.into_vec(), result)
            }
            Err(e) => (Vec::new(), Err(e)),
        };

        match result {
            Ok(()) => Ok(Ingested {
                data,
                truncated: false,
            }),
            Err(e) if e.is_cancellation() => Err(e),
            Err(e) => match mode {
                IngestMode::Strict => Err(e),
                IngestMode::Tolerant => {
                    log::warn!("truncating stream after {} bytes: {e}", data.len());
                    Ok(Ingested {
                        data,
                        truncated: true,
                    })
                }
            },
        }
    }

    fn ingest_into(&mut self, buffer: &mut Buffer, hint: usize) -> Result<()> {
        loop {
            if buffer.is_full() {
                // Buffer is full, so grow.
                buffer.grow()?;
            }

            if self.limits().is_bomb(buffer.len(), hint) {
                return Err(Error::CompressionBomb {
                    len: buffer.len(),
                    hint,
                });
            }

            let bytes_read = self.read_chunk(buffer.unfilled_mut())?;
            if bytes_read == 0 {
                return Ok(());
            }

            buffer.advance(bytes_read);
        }
    }

    /// Reads the rest of the stream, failing on any error.
    ///
    /// Shorthand for [`ingest`](Self::ingest) in [`IngestMode::Strict`].
    pub fn read_all(&mut self, hint: usize) -> Result<Vec<u8>> {
        self.ingest(hint, IngestMode::Strict).map(|ingested| ingested.data)
    }

    /// Reads as much of the stream as possible.
    ///
    /// Shorthand for [`ingest`](Self::ingest) in [`IngestMode::Tolerant`].
    pub fn read_best(&mut self, hint: usize) -> Result<Ingested> {
        self.ingest(hint, IngestMode::Tolerant)
    }
}

/// Reads the whole file at `path` into memory.
///
/// The file is closed before returning, whether or not the read succeeded.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let mut stream = open_file(path)?;
    stream.read_all(0)
}

//! Growable byte buffer with a read cursor.
//!
//! The [`Buffer`] type backs two things: the window a [`Stream`](crate::Stream) holds between
//! its read cursor and the end of the fetched data, and the owned result of ingestion.
//!
//! # Example
//!
//! ```
//! use pull_stream::buffer::Buffer;
//!
//! let mut buffer = Buffer::with_capacity(4);
//! buffer.unfilled_mut()[..3].copy_from_slice(b"abc");
//! buffer.advance(3);
//!
//! // Consume what we processed
//! buffer.consume(1);
//! assert_eq!(buffer.unconsumed(), b"bc");
//!
//! // Growth is geometric
//! buffer.grow().unwrap();
//! assert_eq!(buffer.cap(), 8);
//! assert_eq!(buffer.into_vec(), b"abc");
//! ```

use std::cmp;

use crate::constants::CHUNK_SIZE;
use crate::read::Source;
use crate::{Error, Result};

/// A contiguous, growable byte region.
///
/// # Capacity Management
///
/// - **Allocation**: capacity is exactly what was asked for (at least one byte), so ingestion can
///   size its buffer from a caller's hint plus headroom.
///   [`try_with_capacity()`](Self::try_with_capacity) only reserves the memory and zeroes it a
///   chunk at a time as data arrives.
/// - **Growth**: every [`grow()`](Self::grow) doubles the capacity, or fails without touching
///   the buffer. The buffer never shrinks while it is being filled.
///
/// # Invariants
///
/// This buffer maintains the invariant
/// `0 <= self.pos <= self.len <= self.buf.len() <= self.cap <= self.buf.capacity()` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Internal buffer storage. Only the first `buf.len()` bytes are initialised.
    buf: Vec<u8>,
    /// Logical capacity of the buffer.
    cap: usize,
    /// Number of bytes currently stored in the buffer.
    len: usize,
    /// Number of bytes that have been consumed (read position).
    pos: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Creates a new buffer with a capacity of [`CHUNK_SIZE`].
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(CHUNK_SIZE)
    }

    /// Creates a new buffer with exactly `capacity` bytes of room, or one byte if `capacity` is
    /// zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pull_stream::buffer::Buffer;
    /// assert_eq!(Buffer::with_capacity(1025).cap(), 1025);
    /// assert_eq!(Buffer::with_capacity(0).cap(), 1);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(1);

        Self {
            buf: vec![0; cap],
            cap,
            len: 0,
            pos: 0,
        }
    }

    /// Like [`with_capacity()`](Self::with_capacity), but fails instead of aborting when the
    /// memory cannot be reserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if `capacity` bytes cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pull_stream::buffer::Buffer;
    /// assert_eq!(Buffer::try_with_capacity(1025).unwrap().cap(), 1025);
    /// assert!(Buffer::try_with_capacity(usize::MAX).is_err());
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let cap = capacity.max(1);

        let mut buf = Vec::new();
        buf.try_reserve_exact(cap)
            .map_err(|_| Error::OutOfMemory { requested: cap })?;

        Ok(Self {
            buf,
            cap,
            len: 0,
            pos: 0,
        })
    }

    /// Returns the buffer contents from the beginning up to the current length, consumed or not.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    #[inline]
    pub fn buf(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Returns the data between the read position and the length.
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    #[inline]
    pub fn unconsumed(&self) -> &[u8] {
        &self.buf[self.pos..self.len]
    }

    /// Returns the free tail of the buffer past the length.
    ///
    /// The tail reaches the capacity, or [`CHUNK_SIZE`] past the length when the memory is only
    /// reserved. Bytes written here become visible after a call to [`advance()`](Self::advance).
    #[expect(clippy::indexing_slicing, reason = "Safe by invariant")]
    pub fn unfilled_mut(&mut self) -> &mut [u8] {
        let end = cmp::min(self.len.saturating_add(CHUNK_SIZE), self.cap);
        if self.buf.len() < end {
            // Within the reserved capacity, so this never reallocates
            self.buf.resize(end, 0);
        }

        &mut self.buf[self.len..]
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the number of bytes currently in the buffer, consumed or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` when there is no free tail left.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= self.cap
    }

    /// Returns the current read position (number of consumed bytes).
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes between the read position and the length.
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }

    /// Discards all data in the buffer without changing capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.pos = 0;
        self.len = 0;
    }

    /// Marks `amt` bytes as consumed, clamped to [`len()`](Self::len).
    #[expect(clippy::arithmetic_side_effects, reason = "Safe by invariant")]
    #[inline]
    pub fn consume(&mut self, amt: usize) {
        self.pos = cmp::min(self.pos + amt, self.len);
    }

    /// Steps the read position back by `amt` bytes, clamped to the start of the buffer.
    #[inline]
    pub fn unconsume(&mut self, amt: usize) {
        self.pos = self.pos.saturating_sub(amt);
    }

    /// Marks `amt` bytes of the free tail as filled, clamped to the end of the tail last handed
    /// out by [`unfilled_mut()`](Self::unfilled_mut).
    #[inline]
    pub fn advance(&mut self, amt: usize) {
        self.len = cmp::min(self.len.saturating_add(amt), self.buf.len());
    }

    /// Doubles the capacity.
    ///
    /// The new memory is only reserved; it is zeroed as [`unfilled_mut()`](Self::unfilled_mut)
    /// hands it out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the larger capacity cannot be allocated. The buffer is
    /// unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pull_stream::buffer::Buffer;
    /// let mut buffer = Buffer::with_capacity(1025);
    /// buffer.grow().unwrap();
    /// assert_eq!(buffer.cap(), 2050);
    /// ```
    #[expect(clippy::arithmetic_side_effects, reason = "buf.len() <= cap <= next")]
    pub fn grow(&mut self) -> Result<()> {
        let next = self.cap.saturating_mul(2);
        if next == self.cap {
            return Err(Error::OutOfMemory { requested: usize::MAX });
        }

        self.buf
            .try_reserve_exact(next - self.buf.len())
            .map_err(|_| Error::OutOfMemory { requested: next })?;
        self.cap = next;

        Ok(())
    }

    /// Pulls once from `source` into the free tail, returning the number of bytes added.
    ///
    /// Returns `Ok(0)` without pulling if the buffer is already full.
    ///
    /// # Errors
    ///
    /// Returns whatever error the source raised. The buffer is unchanged in that case.
    pub fn fill(&mut self, mut source: impl Source) -> Result<usize> {
        if self.is_full() {
            debug_assert!(self.len == self.cap);

            // Buffer is full, nothing to read.
            return Ok(0);
        }

        let bytes_read = source.pull(self.unfilled_mut())?;
        self.advance(bytes_read);

        Ok(bytes_read)
    }

    /// Consumes the buffer, returning its filled contents as an owned vector.
    #[inline]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.len);
        self.buf
    }
}

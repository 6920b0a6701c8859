//! Size constants shared by the stream window, the skip scratch region and ingestion.
//!
//! # Size Hierarchy
//!
//! - [`CHUNK_SIZE`]: the default stream window (8 KiB)
//! - [`SKIP_SCRATCH_SIZE`]: the scratch region used when discarding bytes (4 KiB)
//! - [`MIN_INGEST_CAPACITY`]: the smallest initial capacity of an ingestion buffer (1 KiB)
//! - [`BOMB_FLOOR`]: the length an ingestion buffer must reach before the bomb check can trigger
//!   (100 MiB)
//!
//! # Invariant
//!
//! - `CHUNK_SIZE` is a power of 2 and a multiple of 1 KiB (1024 bytes)
//! - `SKIP_SCRATCH_SIZE <= CHUNK_SIZE`
//! - `MIN_INGEST_CAPACITY < BOMB_FLOOR`
//! - `BOMB_FLOOR / BOMB_RATIO > MIN_INGEST_CAPACITY`, so a hint below the minimum capacity can
//!   never make the ratio test fire before the floor is reached

/// Default stream window size (8 KiB).
///
/// The size matches [`std::io::BufReader`]'s internal buffer size.
pub const CHUNK_SIZE: usize =
    // 2^13 = 8192 = 8 * 1024 = 8 KiB
    1 << 13;

/// Size of the stack-local region [`Stream::skip`](crate::Stream::skip) reads into.
pub const SKIP_SCRATCH_SIZE: usize = 1 << 12;

/// Smallest initial capacity of an ingestion buffer, before the extra byte of headroom.
pub const MIN_INGEST_CAPACITY: usize = 1 << 10;

/// Accumulated length (100 MiB) below which the compression bomb check never fires.
pub const BOMB_FLOOR: usize = 100 << 20;

/// Expansion factor over the declared size hint that is treated as a compression bomb.
pub const BOMB_RATIO: usize = 200;

#[cfg(test)]
mod tests;

//! A buffered, pull-based byte stream reader for binary and line oriented formats.
//!
//! A [`Stream`] sits on top of a [`Source`] that hands out raw bytes on demand (a file, a socket,
//! a decompressor) and below the format parsers that want typed reads: fixed-width integers in
//! either byte order, lines, null terminated strings and whole-stream slurps guarded against
//! compression bombs.
//!
//! # Quick start
//!
//! ```
//! use pull_stream::{Line, ReadSource, Stream};
//!
//! let data = b"\x00\x2a\x01\x00line one\r\nrest";
//! let mut stream = Stream::new(ReadSource::new(&data[..]));
//!
//! // Typed reads
//! assert_eq!(stream.read_uint16().unwrap(), 42);
//! assert_eq!(stream.read_uint16_le().unwrap(), 1);
//!
//! // Line reads fold CR, LF and CRLF into one terminator
//! let mut line = [0u8; 32];
//! assert_eq!(stream.read_line(&mut line).unwrap(), Line::Complete(8));
//! assert_eq!(stream.tell(), 14);
//!
//! // Slurp the rest
//! assert_eq!(stream.read_all(0).unwrap(), b"rest");
//! ```
//!
//! # Seeking
//!
//! Seeks are delegated to the source when it supports them. Otherwise a stream can only move
//! forward by discarding bytes; backward seeks are logged as warnings and leave the position
//! untouched.
//!
//! # Crate organisation
//!
//! - [`Stream`]: the reader, with byte primitives, seeking and bit reads.
//! - [`StreamBuilder`]: configures the window size and bomb limits.
//! - [`Source`]: the trait byte suppliers implement; [`ReadSource`] and [`SeekSource`] adapt
//!   `std::io` types.
//! - [`buffer::Buffer`]: the growable buffer used for the window and for ingestion.
//! - [`constants`]: size constants used throughout the crate.

pub mod buffer;
pub mod constants;
mod decode;
mod error;
mod ingest;
mod read;
mod source;
mod stream;
mod text;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use ingest::{IngestLimits, IngestMode, Ingested, read_file};
pub use read::{MetaQuery, MetaValue, Source};
pub use source::{ReadSource, SeekSource, open_file};
pub use stream::{Stream, StreamBuilder};
pub use text::Line;

use std::io::{self, SeekFrom};

use crate::Result;

/// A `Source` supplies raw bytes to a [`Stream`](crate::Stream) on demand.
///
/// Sources are the bottom of a reading stack: a file, a socket, or a decompression or filter
/// stage pulling from yet another stream. The stream owns the window the bytes land in, a source
/// only has to write into the slice it is handed.
///
/// Only [`pull`](Source::pull) is required. Native seeking and capability queries are optional
/// and report their absence through
/// [`is_seekable`](Source::is_seekable) and a `None` query answer.
pub trait Source {
    /// Writes up to `buf.len()` bytes into `buf` and returns how many were written.
    ///
    /// Returning `Ok(0)` for a non-empty `buf` signals end of input. A source may block until
    /// data is available. Returning [`Error::Cancelled`](crate::Error::Cancelled) asks every
    /// caller up the stack to stop.
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Repositions the source, returning the new absolute offset.
    ///
    /// Only [`SeekFrom::Start`] and [`SeekFrom::End`] are ever passed in; the stream resolves
    /// relative offsets itself. Never called unless [`is_seekable`](Source::is_seekable) returns
    /// `true`.
    fn seek(&mut self, to: SeekFrom) -> Result<u64> {
        let _ = to;
        Err(io::Error::from(io::ErrorKind::Unsupported).into())
    }

    /// Whether [`seek`](Source::seek) is natively supported.
    fn is_seekable(&self) -> bool {
        false
    }

    /// Answers a capability query, or `None` when the query is unsupported.
    fn meta(&mut self, query: MetaQuery) -> Option<MetaValue> {
        let _ = query;
        None
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).pull(buf)
    }

    fn seek(&mut self, to: SeekFrom) -> Result<u64> {
        (**self).seek(to)
    }

    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }

    fn meta(&mut self, query: MetaQuery) -> Option<MetaValue> {
        (**self).meta(query)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).pull(buf)
    }

    fn seek(&mut self, to: SeekFrom) -> Result<u64> {
        (**self).seek(to)
    }

    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }

    fn meta(&mut self, query: MetaQuery) -> Option<MetaValue> {
        (**self).meta(query)
    }
}

/// Capability queries understood by [`Source::meta`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaQuery {
    /// Total length of the underlying data in bytes.
    Length,
    /// Whether the data is still arriving (e.g. a download in progress).
    Progressive,
}

/// Typed answers to a [`MetaQuery`], one variant per query kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaValue {
    Length(u64),
    Progressive(bool),
}

//! Error kinds raised by stream operations.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An operation needing an exact byte count hit end of input.
    #[error("premature end of file in {what}")]
    ShortRead { what: &'static str },

    /// End of input arrived before a required terminator.
    #[error("EOF reading {what}")]
    UnexpectedEof { what: &'static str },

    /// The destination cannot hold the value including its terminator.
    #[error("buffer overrun reading null terminated string")]
    BufferOverrun,

    /// The source inflated far beyond the size declared by the caller.
    #[error("compression bomb detected ({len} bytes read against a hint of {hint})")]
    CompressionBomb { len: usize, hint: usize },

    /// A buffer of the requested size could not be allocated.
    #[error("out of memory allocating {requested} bytes")]
    OutOfMemory { requested: usize },

    /// The caller asked to abandon the operation.
    ///
    /// Never absorbed, not even by tolerant ingestion.
    #[error("operation cancelled")]
    Cancelled,

    /// A relative seek resolved to an offset before the start of the stream.
    #[error("cannot seek to negative offset {0}")]
    InvalidSeek(i64),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns `true` for errors that must propagate regardless of ingestion mode.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            Error::ShortRead { .. } | Error::UnexpectedEof { .. } => {
                io::Error::new(io::ErrorKind::UnexpectedEof, err)
            }
            Error::BufferOverrun | Error::InvalidSeek(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            Error::CompressionBomb { .. } => io::Error::new(io::ErrorKind::InvalidData, err),
            Error::OutOfMemory { .. } => io::Error::new(io::ErrorKind::OutOfMemory, err),
            // Not `Interrupted`: std adapters retry those silently
            Error::Cancelled => io::Error::other(err),
        }
    }
}

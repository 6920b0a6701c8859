//! Ready-made [`Source`] implementations over `std::io` readers.
//!
//! - [`ReadSource`] wraps any [`Read`]. It has no native seek, so a [`Stream`] over it can only
//!   seek forward by discarding bytes.
//! - [`SeekSource`] wraps a [`Read`] + [`Seek`] and forwards seeks and length queries.
//!
//! # Example
//!
//! ```
//! use pull_stream::{ReadSource, Stream};
//!
//! let mut stream = Stream::new(ReadSource::new(&b"\x01\x02"[..]));
//! assert_eq!(stream.read_uint16().unwrap(), 0x0102);
//! ```

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::read::{MetaQuery, MetaValue, Source};
use crate::{Result, Stream};

/// Reads into `buf`, retrying on [`io::ErrorKind::Interrupted`] like [`io::BufReader`] does.
fn pull_retrying(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
}

/// A forward-only source over any [`Read`].
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R> ReadSource<R> {
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        pull_retrying(&mut self.inner, buf)
    }
}

/// A seekable source over any [`Read`] + [`Seek`], such as a [`File`] or an
/// [`io::Cursor`].
#[derive(Debug)]
pub struct SeekSource<R> {
    inner: R,
}

impl<R: Read + Seek> SeekSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Finds the total length by seeking to the end, then restores the current offset.
    fn total_len(&mut self) -> io::Result<u64> {
        let current = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        if current != end {
            self.inner.seek(SeekFrom::Start(current))?;
        }
        Ok(end)
    }
}

impl<R> SeekSource<R> {
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Source for SeekSource<R> {
    fn pull(&mut self, buf: &mut [u8]) -> Result<usize> {
        pull_retrying(&mut self.inner, buf)
    }

    fn seek(&mut self, to: SeekFrom) -> Result<u64> {
        Ok(self.inner.seek(to)?)
    }

    fn is_seekable(&self) -> bool {
        true
    }

    fn meta(&mut self, query: MetaQuery) -> Option<MetaValue> {
        match query {
            MetaQuery::Length => match self.total_len() {
                Ok(len) => Some(MetaValue::Length(len)),
                Err(e) => {
                    log::debug!("length query failed: {e}");
                    None
                }
            },
            MetaQuery::Progressive => Some(MetaValue::Progressive(false)),
        }
    }
}

/// Opens the file at `path` as a seekable stream.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the file cannot be opened.
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Stream<SeekSource<File>>> {
    let path = path.as_ref();
    log::debug!("opening {}", path.display());
    let file = File::open(path)?;
    Ok(Stream::new(SeekSource::new(file)))
}

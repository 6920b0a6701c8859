//! Fixed-width integer decoders in big- and little-endian byte order.
//!
//! Every decoder needs its exact byte count. Bytes are collected one at a time and only combined
//! once all of them arrived, so a short read can never leak a half-assembled value.
//!
//! # Example
//!
//! ```
//! use pull_stream::{Error, ReadSource, Stream};
//!
//! let mut stream = Stream::new(ReadSource::new(&[0x01, 0x02, 0x03][..]));
//! assert_eq!(stream.read_uint16().unwrap(), 0x0102);
//! assert!(matches!(stream.read_uint16_le(), Err(Error::ShortRead { .. })));
//! ```

use crate::read::Source;
use crate::{Error, Result, Stream};

impl<S: Source> Stream<S> {
    /// Reads exactly `N` bytes, failing with [`Error::ShortRead`] naming `what` otherwise.
    fn read_array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N]> {
        let mut slots = [None; N];
        for slot in &mut slots {
            *slot = self.read_byte()?;
        }

        let mut bytes = [0; N];
        for (byte, slot) in bytes.iter_mut().zip(slots) {
            *byte = slot.ok_or(Error::ShortRead { what })?;
        }

        Ok(bytes)
    }

    /// Reads a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShortRead`] if fewer than 2 bytes are left.
    pub fn read_uint16(&mut self) -> Result<u16> {
        self.read_array("int16").map(u16::from_be_bytes)
    }

    /// Reads a big-endian 24-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShortRead`] if fewer than 3 bytes are left.
    pub fn read_uint24(&mut self) -> Result<u32> {
        let [a, b, c] = self.read_array("int24")?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Reads a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShortRead`] if fewer than 4 bytes are left.
    pub fn read_uint32(&mut self) -> Result<u32> {
        self.read_array("int32").map(u32::from_be_bytes)
    }

    /// Reads a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShortRead`] if fewer than 8 bytes are left.
    pub fn read_uint64(&mut self) -> Result<u64> {
        self.read_array("int64").map(u64::from_be_bytes)
    }

    /// Little-endian counterpart of [`read_uint16`](Self::read_uint16).
    pub fn read_uint16_le(&mut self) -> Result<u16> {
        self.read_array("int16").map(u16::from_le_bytes)
    }

    /// Little-endian counterpart of [`read_uint24`](Self::read_uint24).
    pub fn read_uint24_le(&mut self) -> Result<u32> {
        let [a, b, c] = self.read_array("int24")?;
        Ok(u32::from_le_bytes([a, b, c, 0]))
    }

    /// Little-endian counterpart of [`read_uint32`](Self::read_uint32).
    pub fn read_uint32_le(&mut self) -> Result<u32> {
        self.read_array("int32").map(u32::from_le_bytes)
    }

    /// Little-endian counterpart of [`read_uint64`](Self::read_uint64).
    pub fn read_uint64_le(&mut self) -> Result<u64> {
        self.read_array("int64").map(u64::from_le_bytes)
    }

    // Signed variants reinterpret the unsigned bit pattern.

    pub fn read_int16(&mut self) -> Result<i16> {
        self.read_array("int16").map(i16::from_be_bytes)
    }

    pub fn read_int32(&mut self) -> Result<i32> {
        self.read_array("int32").map(i32::from_be_bytes)
    }

    pub fn read_int64(&mut self) -> Result<i64> {
        self.read_array("int64").map(i64::from_be_bytes)
    }

    pub fn read_int16_le(&mut self) -> Result<i16> {
        self.read_array("int16").map(i16::from_le_bytes)
    }

    pub fn read_int32_le(&mut self) -> Result<i32> {
        self.read_array("int32").map(i32::from_le_bytes)
    }

    pub fn read_int64_le(&mut self) -> Result<i64> {
        self.read_array("int64").map(i64::from_le_bytes)
    }
}

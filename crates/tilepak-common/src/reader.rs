//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor over an immutable byte
//! slice. Every read consumes exactly its declared width or fails with
//! [`Error::OutOfBounds`] without moving the cursor.

use zerocopy::FromBytes;

use crate::{Error, Result, Uuid};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// All multi-byte integers are little-endian.
///
/// # Example
///
/// ```
/// use tilepak_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u16().unwrap(), 0x0605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Get the remaining bytes as a slice.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Consume and return everything left in the buffer.
    #[inline]
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.remaining_bytes();
        self.position = self.data.len();
        rest
    }

    fn out_of_bounds(&self, needed: usize) -> Error {
        Error::OutOfBounds {
            offset: self.position,
            needed,
            available: self.remaining(),
        }
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(self.out_of_bounds(count));
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Discard reserved or padding bytes.
    #[inline]
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_array().map(i16::from_le_bytes)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a 16-byte identifier.
    #[inline]
    pub fn read_uuid(&mut self) -> Result<Uuid> {
        self.read_array().map(Uuid::from_bytes)
    }

    /// Read a length-prefixed byte string (u16 length, then raw bytes).
    ///
    /// No text encoding is implied; the bytes are returned as-is.
    pub fn read_pascal_string(&mut self) -> Result<&'a [u8]> {
        let start = self.position;
        let length = self.read_u16()? as usize;
        match self.read_bytes(length) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                self.position = start;
                Err(e)
            }
        }
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.peek_bytes(size)?;
        let value = T::read_from_bytes(bytes).map_err(|_| self.out_of_bounds(size))?;
        self.position += size;
        Ok(value)
    }
}

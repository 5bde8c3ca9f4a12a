//! Low-level byte cursor for class-file decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor over a borrowed byte
//! slice. All reads are bounds checked and advance the cursor monotonically; a failed read
//! leaves the cursor where it was, so the reported error offset always points at the field
//! that could not be read.
//!
//! # Examples
//!
//! ```rust
//! use jvmeta::Parser;
//!
//! let data = [0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0xAB];
//! let mut parser = Parser::new(&data);
//!
//! let flags: u16 = parser.read_be()?;
//! let length: u32 = parser.read_be()?;
//! let body = parser.read_bytes(length as usize - 1)?;
//!
//! assert_eq!(flags, 1);
//! assert_eq!(body, &[0xAB]);
//! assert!(!parser.has_more_data());
//! # Ok::<(), jvmeta::Error>(())
//! ```

use crate::{
    file::io::{read_be_at, ClassIO},
    Result,
};

/// A cursor-based reader for big-endian class-file data.
///
/// The parser only knows about bytes. Constant pool lookups are layered on top of it by
/// [`crate::ClassReader`].
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] from a byte slice, positioned at its first byte.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Number of bytes left between the cursor and the end of the data.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Read a type `T` from the current position in big-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_be<T: ClassIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Reads `length` raw bytes from the current position and advances past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if length > available {
            return Err(out_of_bounds_error!(self.position, length, available));
        }

        let end = self.position + length;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Returns the byte at the current position without advancing.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at end of input.
    pub fn peek_byte(&self) -> Result<u8> {
        match self.data.get(self.position) {
            Some(byte) => Ok(*byte),
            None => Err(out_of_bounds_error!(self.position, 1, 0)),
        }
    }
}

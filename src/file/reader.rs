//! Sequential reader over class-file bytes with constant pool access.
//!
//! [`ClassReader`] pairs a [`Parser`] with a borrowed, already populated [`ConstantPool`]. Record
//! types such as [`crate::Method`] and [`crate::Attribute`] read their fixed-width fields through
//! it and resolve pool indices on the spot, so an invalid index is reported before any further
//! byte is consumed.

use crate::{constpool::ConstantPool, file::parser::Parser, Result};

/// The binary reader handed to every `read` operation.
///
/// The pool is passed in explicitly and only borrowed immutably: reading never interns.
#[derive(Debug, Clone)]
pub struct ClassReader<'a, 'p> {
    parser: Parser<'a>,
    pool: &'p ConstantPool,
}

impl<'a, 'p> ClassReader<'a, 'p> {
    /// Creates a reader positioned at the first byte of `data`.
    #[must_use]
    pub fn new(data: &'a [u8], pool: &'p ConstantPool) -> Self {
        Self::with_parser(Parser::new(data), pool)
    }

    /// Continues reading from an existing cursor, typically one that has just consumed the
    /// constant pool itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jvmeta::{ClassReader, ConstantPool, Parser};
    ///
    /// let data = [0x00, 0x02, 0x01, 0x00, 0x01, b'x', 0x00, 0x01];
    /// let mut parser = Parser::new(&data);
    /// let pool = ConstantPool::read(&mut parser)?;
    ///
    /// let mut reader = ClassReader::with_parser(parser, &pool);
    /// assert_eq!(reader.read_utf8()?, "x");
    /// # Ok::<(), jvmeta::Error>(())
    /// ```
    #[must_use]
    pub fn with_parser(parser: Parser<'a>, pool: &'p ConstantPool) -> Self {
        ClassReader { parser, pool }
    }

    /// The constant pool indices are resolved against.
    #[must_use]
    pub fn pool(&self) -> &'p ConstantPool {
        self.pool
    }

    /// Current cursor position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.parser.pos()
    }

    /// Returns `true` if bytes remain after the cursor.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.parser.has_more_data()
    }

    /// Gives the cursor back, e.g. to hand it to the next reader.
    #[must_use]
    pub fn into_parser(self) -> Parser<'a> {
        self.parser
    }

    /// Reads a `u1`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at end of input.
    pub fn read_u1(&mut self) -> Result<u8> {
        self.parser.read_be()
    }

    /// Reads a big-endian `u2`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at end of input.
    pub fn read_u2(&mut self) -> Result<u16> {
        self.parser.read_be()
    }

    /// Reads a big-endian `u4`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at end of input.
    pub fn read_u4(&mut self) -> Result<u32> {
        self.parser.read_be()
    }

    /// Reads `length` raw bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        self.parser.read_bytes(length)
    }

    /// Reads a `u2` constant pool index and resolves it to the string of a `CONSTANT_Utf8` entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] at end of input, and
    /// [`crate::Error::InvalidReference`] if the index is not a usable Utf8 entry.
    pub fn read_utf8(&mut self) -> Result<&'p str> {
        let index = self.read_u2()?;
        self.pool.utf8_at(index)
    }
}

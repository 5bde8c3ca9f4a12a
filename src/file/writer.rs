//! Sequential writer producing class-file bytes.
//!
//! [`ClassWriter`] appends big-endian fields to an owned buffer and looks up the indices of
//! values that the resolve phase interned into the [`ConstantPool`]. It never interns anything
//! itself: a lookup miss is reported as [`crate::Error::Unresolved`] instead of emitting a
//! placeholder index.

use crate::{constpool::ConstantPool, file::io::write_be_to, Result};

/// The binary writer handed to every `write` operation.
#[derive(Debug, Clone)]
pub struct ClassWriter<'p> {
    data: Vec<u8>,
    pool: &'p ConstantPool,
}

impl<'p> ClassWriter<'p> {
    /// Creates a writer with an empty output buffer.
    #[must_use]
    pub fn new(pool: &'p ConstantPool) -> Self {
        ClassWriter {
            data: Vec::new(),
            pool,
        }
    }

    /// The constant pool indices are looked up in.
    #[must_use]
    pub fn pool(&self) -> &'p ConstantPool {
        self.pool
    }

    /// Bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the writer, returning the output buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Appends a `u1`.
    pub fn write_u1(&mut self, value: u8) {
        write_be_to(&mut self.data, value);
    }

    /// Appends a big-endian `u2`.
    pub fn write_u2(&mut self, value: u16) {
        write_be_to(&mut self.data, value);
    }

    /// Appends a big-endian `u4`.
    pub fn write_u4(&mut self, value: u32) {
        write_be_to(&mut self.data, value);
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Appends the `u2` pool index of an interned `CONSTANT_Utf8` string.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unresolved`] if the string was never interned; nothing is
    /// appended in that case.
    pub fn write_utf8(&mut self, value: &str) -> Result<()> {
        let index = self.pool.utf8_index(value)?;
        self.write_u2(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn writes_fields_in_order() {
        let mut pool = ConstantPool::new();
        pool.add_utf8("a").unwrap();
        pool.add_utf8("Exceptions").unwrap();

        let mut writer = ClassWriter::new(&pool);
        assert!(writer.is_empty());
        writer.write_u1(0xFE);
        writer.write_utf8("Exceptions").unwrap();
        writer.write_u4(1);
        writer.write_bytes(&[0x10]);

        assert_eq!(writer.len(), 8);
        assert_eq!(
            writer.into_bytes(),
            [0xFE, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x10]
        );
    }

    #[test]
    fn unresolved_string_is_an_error() {
        let pool = ConstantPool::new();
        let mut writer = ClassWriter::new(&pool);

        assert!(matches!(writer.write_utf8("main"), Err(Error::Unresolved(_))));
        assert!(writer.as_bytes().is_empty());
    }
}

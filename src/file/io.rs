//! Big-endian, bounds-checked reading and writing of fixed-width values.
//!
//! Every multi-byte quantity in a class file is stored big-endian (JVMS §4.1: "u1, u2, and u4
//! represent an unsigned one-, two-, or four-byte quantity"). This module provides the primitive
//! layer that [`crate::file::parser::Parser`] and [`crate::file::writer::ClassWriter`] build on.
//!
//! # Key Components
//!
//! - [`crate::file::io::ClassIO`] - Trait describing how a primitive converts to and from bytes
//! - [`crate::file::io::read_be_at`] - Read a value at an offset and advance the offset
//! - [`crate::file::io::write_be_to`] - Append a value to a growable buffer
//!
//! # Examples
//!
//! ```rust,ignore
//! use jvmeta::file::io::{read_be_at, write_be_to};
//!
//! let mut out = Vec::new();
//! write_be_to(&mut out, 0xCAFEu16);
//! write_be_to(&mut out, 1u32);
//! assert_eq!(out, [0xCA, 0xFE, 0x00, 0x00, 0x00, 0x01]);
//!
//! let mut offset = 0;
//! let magic: u16 = read_be_at(&out, &mut offset)?;
//! assert_eq!(magic, 0xCAFE);
//! assert_eq!(offset, 2);
//! # Ok::<(), jvmeta::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Reads return [`crate::Error::OutOfBounds`] when the buffer is too short.
//! The error carries the offset at which the access was attempted, so truncated input can be
//! located precisely.

use crate::Result;

/// Trait for type-specific binary conversion of primitives.
///
/// Each implementation names the fixed-size byte array that holds one value (e.g. `[u8; 2]` for
/// `u16`). The reading and writing functions of this module are generic over it.
pub trait ClassIO: Sized {
    /// The byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in big-endian
    fn to_be_bytes(self) -> Self::Bytes;
}

macro_rules! impl_class_io {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl ClassIO for $ty {
                type Bytes = [u8; $len];

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_class_io! {
    u8 => 1,
    u16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
}

/// Reads a value of type `T` in big-endian byte order at `offset`, advancing the offset by the
/// size of `T`.
///
/// The offset is left untouched when the read fails.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be_at<T: ClassIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let available = data.len().saturating_sub(*offset);
    if type_len > available {
        return Err(out_of_bounds_error!(*offset, type_len, available));
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(out_of_bounds_error!(*offset, type_len, available));
    };

    *offset += type_len;

    Ok(T::from_be_bytes(read))
}

/// Appends a value of type `T` in big-endian byte order to a growable buffer.
///
/// Appending cannot fail.
pub fn write_be_to<T: ClassIO>(data: &mut Vec<u8>, value: T) {
    data.extend_from_slice(value.to_be_bytes().as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    fn read_be<T: ClassIO>(data: &[u8]) -> Result<T> {
        let mut offset = 0;
        read_be_at(data, &mut offset)
    }

    #[test]
    fn read_be_u8() {
        let result = read_be::<u8>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x1);
    }

    #[test]
    fn read_be_u16() {
        let result = read_be::<u16>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x102);
    }

    #[test]
    fn read_be_u32() {
        let result = read_be::<u32>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x1020304);
    }

    #[test]
    fn read_be_u64() {
        let result = read_be::<u64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x102030405060708);
    }

    #[test]
    fn read_be_signed() {
        let result = read_be::<i32>(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap();
        assert_eq!(result, -2);

        let result = read_be::<i64>(&[0x80, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(result, i64::MIN);
    }

    #[test]
    fn read_be_from() {
        let mut offset = 2_usize;
        let result = read_be_at::<u16>(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(result, 0x304);
        assert_eq!(offset, 4);
    }

    #[test]
    fn read_be_past_end() {
        let mut offset = 7_usize;
        match read_be_at::<u16>(&TEST_BUFFER, &mut offset) {
            Err(Error::OutOfBounds {
                offset,
                needed,
                available,
            }) => {
                assert_eq!(offset, 7);
                assert_eq!(needed, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
        assert_eq!(offset, 7);
    }

    #[test]
    fn read_be_offset_beyond_buffer() {
        let mut offset = 12_usize;
        assert!(read_be_at::<u8>(&TEST_BUFFER, &mut offset).is_err());
    }

    #[test]
    fn write_be_to_appends() {
        let mut out = vec![0xAA];
        write_be_to(&mut out, 0xCAFE_BABEu32);
        write_be_to(&mut out, 0xFFFFu16);
        assert_eq!(out, [0xAA, 0xCA, 0xFE, 0xBA, 0xBE, 0xFF, 0xFF]);
    }
}

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    ($offset:expr, $needed:expr, $available:expr) => {
        crate::Error::OutOfBounds {
            offset: $offset,
            needed: $needed,
            available: $available,
        }
    };
}

macro_rules! invalid_reference_error {
    ($index:expr, $fmt:expr) => {
        crate::Error::InvalidReference {
            index: $index,
            reason: $fmt.to_string(),
        }
    };

    ($index:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidReference {
            index: $index,
            reason: format!($fmt, $($arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure aborts the record currently being read, resolved or written and is handed
/// back to the caller unchanged. There is no partial-success mode: a [`crate::Method`] is either
/// fully materialized / emitted, or the operation is abandoned.
///
/// # Error Categories
///
/// ## Stream Errors
/// - [`Error::OutOfBounds`] - The input ended in the middle of a record
/// - [`Error::Malformed`] - The bytes are structurally invalid (bad tag, bad string encoding)
///
/// ## Constant Pool Errors
/// - [`Error::InvalidReference`] - An index read from the stream does not name a usable entry
/// - [`Error::Unresolved`] - A value was written that was never interned into the pool
/// - [`Error::PoolOverflow`] - The pool cannot grow past 65535 slots
///
/// # Examples
///
/// ```rust
/// use jvmeta::{ConstantPool, ClassReader, Error, Method};
///
/// let pool = ConstantPool::new();
/// let data = [0x00, 0x01, 0x00, 0x32, 0x00, 0x01, 0x00, 0x00];
/// let mut reader = ClassReader::new(&data, &pool);
///
/// match Method::read(&mut reader, None) {
///     Err(Error::InvalidReference { index, .. }) => assert_eq!(index, 0x32),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while reading the stream.
    ///
    /// Raised when a fixed-width field, or a byte run whose length was declared earlier in the
    /// stream, extends past the end of the available input.
    #[error("Out of bound read at offset {offset}: needed {needed} byte(s), {available} available")]
    OutOfBounds {
        /// Cursor position at which the read was attempted
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes left in the input
        available: usize,
    },

    /// A constant pool index does not resolve to a usable entry of the expected kind.
    ///
    /// This is fatal for the enclosing read. The index is reported as it appeared in the stream.
    #[error("Invalid constant pool reference #{index}: {reason}")]
    InvalidReference {
        /// The offending constant pool index
        index: u16,
        /// Why the index could not be used
        reason: String,
    },

    /// A value was looked up for writing but was never interned into the constant pool.
    ///
    /// This signals caller misuse: `resolve` has to run over the whole class file before
    /// `write` starts.
    #[error("Value was never resolved into the constant pool - {0}")]
    Unresolved(String),

    /// The constant pool cannot hold more entries.
    ///
    /// Indices are 16 bits wide, so a pool has at most 65535 slots (slot 0 is unusable).
    #[error("The constant pool is full")]
    PoolOverflow,
}

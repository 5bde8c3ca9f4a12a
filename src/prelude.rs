//! # jvmeta Prelude
//!
//! Glob-importable re-exports of the types needed to read, resolve and write method records.
//!
//! ```rust
//! use jvmeta::prelude::*;
//!
//! let method = MethodBuilder::new("run", "()V").build();
//! let mut pool = ConstantPool::new();
//! method.resolve(&mut pool)?;
//! # Ok::<(), Error>(())
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all jvmeta operations
pub use crate::Error;

/// The result type used throughout jvmeta
pub use crate::Result;

// ================================================================================================
// Binary Cursors and Constant Pool
// ================================================================================================

/// Sequential reader and writer handed to every codec operation
pub use crate::{ClassReader, ClassWriter, Parser};

/// Constant pool and its entries
pub use crate::{ConstantPool, ConstantPoolInfo, ConstantTag};

// ================================================================================================
// Records
// ================================================================================================

/// Opaque attributes
pub use crate::{Attribute, AttributeKind};

/// Method records, their flags and construction
pub use crate::{Method, MethodAccessFlags, MethodBuilder, MethodFlags};

/// Optional legality checks
pub use crate::{validate, ValidationConfig, Violation};

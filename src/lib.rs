// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # jvmeta
//!
//! Reading and writing of JVM class-file `method_info` records, bit for bit.
//!
//! A method record is small: a flag word, two constant pool indices and a list of attributes.
//! The hard part is the exact round trip. Flags have to decode into named properties and
//! re-encode to the same mask, both strings have to go through a shared deduplicating constant
//! pool, and attributes of any kind have to be sequenced without being understood.
//!
//! ## Features
//!
//! - **Bit-exact codec** - `write(read(bytes)) == bytes` for every well-formed record
//! - **Explicit constant pool** - passed by reference into every read, resolve and write
//! - **Opaque attributes** - unknown and well-known attributes are carried verbatim
//! - **Opt-in validation** - JVMS legality rules as a separate pure function
//! - **Diagnostic rendering** - indented dumps through the `log` facade, zero cost when off
//!
//! ## Quick Start
//!
//! ```rust
//! use jvmeta::prelude::*;
//!
//! // Pool as it would come out of the surrounding class file
//! let mut pool = ConstantPool::new();
//! pool.add_utf8("main")?;
//! pool.add_utf8("([Ljava/lang/String;)V")?;
//!
//! let data = [0x00, 0x09, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00];
//! let mut reader = ClassReader::new(&data, &pool);
//! let method = Method::read(&mut reader, None)?;
//! assert!(method.flags.is_public && method.flags.is_static);
//!
//! // Resolve over the whole class before writing anything
//! method.resolve(&mut pool)?;
//! let mut writer = ClassWriter::new(&pool);
//! method.write(&mut writer)?;
//! assert_eq!(writer.as_bytes(), data);
//! # Ok::<(), jvmeta::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`method`] - the [`Method`] record, its flags, builder, rendering and validation
//! - [`attributes`] - opaque [`Attribute`] records and their well-known kinds
//! - [`constpool`] - the [`ConstantPool`] that strings are interned into and resolved from
//! - [`ClassReader`] / [`ClassWriter`] - sequential big-endian cursors carrying the pool
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Diagnostics
//!
//! Passing `Some(depth)` as `trace` to [`Method::read`] logs the record header at debug level
//! under the `jvmeta::dump` target, with attributes two levels deeper. The crate never installs
//! a logger.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

mod dump;

/// Convenient re-exports of the most commonly used types
pub mod prelude;

pub mod attributes;
pub mod constpool;
pub mod method;

/// `jvmeta` Result type
///
/// A type alias for `std::result::Result<T, Error>` used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `jvmeta` Error type
///
/// Every fallible operation in this crate reports one of its variants; nothing is recovered
/// locally.
pub use error::Error;

/// Byte cursors: the raw [`Parser`] and the pool-aware reader and writer
pub use file::{parser::Parser, reader::ClassReader, writer::ClassWriter};

/// Constant pool storage
pub use constpool::{ConstantPool, ConstantPoolInfo, ConstantTag};

/// Attribute records
pub use attributes::{Attribute, AttributeKind};

/// The method record and everything built around it
pub use method::{
    validate, Method, MethodAccessFlags, MethodBuilder, MethodDump, MethodFlags,
    ValidationConfig, Violation,
};

//! Byte-level plumbing shared by every record type: endian-aware primitives, the input cursor,
//! and the pool-aware reader and writer built on top of it.

pub mod io;
pub mod parser;
pub mod reader;
pub mod writer;

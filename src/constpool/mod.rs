//! The class-file constant pool.
//!
//! The pool is the shared, deduplicating table through which every string of a class file is
//! referenced by index. A [`ConstantPool`] is either read from an existing class file, in which
//! case the original indices are preserved, or grown by interning values during the resolve
//! phase that precedes writing.
//!
//! # Index Management
//!
//! Pool indices are 1-based (JVMS §4.1):
//! - Index 0 is never valid
//! - Long and Double entries take two slots; the second one is unusable
//! - A pool holds at most 65534 usable slots, because `constant_pool_count` is a u2
//!
//! Entries are append-only: interning never moves an existing entry, so indices handed out
//! earlier stay valid for the whole resolve pass.
//!
//! # Examples
//!
//! ```rust
//! use jvmeta::{ConstantPool, ConstantPoolInfo};
//!
//! let mut pool = ConstantPool::new();
//! let name = pool.add_utf8("main")?;
//! let again = pool.add(ConstantPoolInfo::Utf8("main".to_string()))?;
//!
//! assert_eq!(name, 1);
//! assert_eq!(name, again);
//! assert_eq!(pool.utf8_at(name)?, "main");
//! # Ok::<(), jvmeta::Error>(())
//! ```

mod info;
pub(crate) mod mutf8;

pub use info::{constant_pool_index, ConstantPoolInfo, ConstantTag};

use std::collections::HashMap;

use crate::{
    file::{io::write_be_to, parser::Parser},
    Error, Result,
};

/// Highest usable constant pool index.
pub const MAX_POOL_INDEX: u16 = u16::MAX - 1;

/// An indexed, deduplicating table of [`ConstantPoolInfo`] entries.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    /// Slot `i` holds index `i + 1`. `None` marks the unusable slot after a Long or Double.
    entries: Vec<Option<ConstantPoolInfo>>,
    /// First index at which each distinct entry appears
    lookup: HashMap<ConstantPoolInfo, u16>,
}

impl ConstantPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `constant_pool_count` followed by the pool entries, keeping every entry at the
    /// index it has in the input.
    ///
    /// Duplicate entries in the input are kept as they are; interning later returns the lowest
    /// index at which a value appears.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated input and [`crate::Error::Malformed`]
    /// for a zero count, an unknown tag, or a Long/Double overrunning the declared count.
    pub fn read(parser: &mut Parser) -> Result<Self> {
        let count: u16 = parser.read_be()?;
        if count == 0 {
            return Err(malformed_error!("constant_pool_count must be at least 1"));
        }

        let mut pool = ConstantPool::new();
        while pool.next_index() < count {
            let entry = ConstantPoolInfo::read(parser)?;
            if u32::from(pool.next_index()) + u32::from(entry.slots()) > u32::from(count) {
                return Err(malformed_error!(
                    "{} entry at index {} overruns constant_pool_count {}",
                    entry.tag(),
                    pool.next_index(),
                    count
                ));
            }
            pool.push(entry);
        }

        Ok(pool)
    }

    /// Appends `constant_pool_count` followed by every entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if an entry cannot be encoded.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        write_be_to(out, self.next_index());
        for entry in self.entries.iter().flatten() {
            entry.write(out)?;
        }
        Ok(())
    }

    /// Number of slots in use, unusable ones included. This is `constant_pool_count - 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the pool holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index the next appended entry will receive.
    #[must_use]
    pub fn next_index(&self) -> u16 {
        // entries.len() never exceeds MAX_POOL_INDEX
        self.entries.len() as u16 + 1
    }

    /// Interns `entry`, returning its index.
    ///
    /// If an equal entry is already present its existing index is returned and the pool is
    /// left unchanged. A [`ConstantPoolInfo::Utf8Bytes`] entry whose bytes decode to a string
    /// is interned as the equivalent [`ConstantPoolInfo::Utf8`].
    ///
    /// # Errors
    /// Returns [`crate::Error::PoolOverflow`] if the entry does not fit, and
    /// [`crate::Error::Malformed`] for a Utf8 value whose encoding exceeds 65535 bytes or for
    /// raw Utf8 bytes that are not valid modified UTF-8.
    pub fn add(&mut self, entry: ConstantPoolInfo) -> Result<u16> {
        let entry = match entry {
            ConstantPoolInfo::Utf8Bytes(bytes) => ConstantPoolInfo::utf8_from_bytes(&bytes)?,
            entry => entry,
        };

        if let Some(&index) = self.lookup.get(&entry) {
            return Ok(index);
        }

        let length = match &entry {
            ConstantPoolInfo::Utf8(value) => mutf8::encoded_len(value),
            ConstantPoolInfo::Utf8Bytes(bytes) => bytes.len(),
            _ => 0,
        };
        if length > usize::from(u16::MAX) {
            return Err(malformed_error!(
                "Utf8 constant of {} bytes exceeds the u2 length field",
                length
            ));
        }

        if self.entries.len() + usize::from(entry.slots()) > usize::from(MAX_POOL_INDEX) {
            return Err(Error::PoolOverflow);
        }

        log::trace!("interning {:?} at #{}", entry, self.next_index());
        Ok(self.push(entry))
    }

    /// Interns a string as a `CONSTANT_Utf8` entry.
    ///
    /// # Errors
    /// See [`ConstantPool::add`].
    pub fn add_utf8(&mut self, value: &str) -> Result<u16> {
        self.add(ConstantPoolInfo::Utf8(value.to_string()))
    }

    /// Looks up the index of an entry that must already be present.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unresolved`] if the entry was never interned.
    pub fn index(&self, entry: &ConstantPoolInfo) -> Result<u16> {
        self.lookup
            .get(entry)
            .copied()
            .ok_or_else(|| Error::Unresolved(format!("{entry:?}")))
    }

    /// Looks up the index of a `CONSTANT_Utf8` entry that must already be present.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unresolved`] if the string was never interned.
    pub fn utf8_index(&self, value: &str) -> Result<u16> {
        self.lookup
            .get(&ConstantPoolInfo::Utf8(value.to_string()))
            .copied()
            .ok_or_else(|| Error::Unresolved(format!("Utf8 \"{value}\"")))
    }

    /// Returns the entry at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidReference`] for index 0, an index past the end of the pool,
    /// or the unusable slot following a Long or Double.
    pub fn get(&self, index: u16) -> Result<&ConstantPoolInfo> {
        if index == 0 {
            return Err(invalid_reference_error!(index, "index 0 is never valid"));
        }

        match self.entries.get(usize::from(index) - 1) {
            Some(Some(entry)) => Ok(entry),
            Some(None) => Err(invalid_reference_error!(
                index,
                "slot follows a Long or Double entry"
            )),
            None => Err(invalid_reference_error!(
                index,
                "out of range, the pool has {} slot(s)",
                self.entries.len()
            )),
        }
    }

    /// Returns the string held by the `CONSTANT_Utf8` entry at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidReference`] if the index is unusable, does not refer to a
    /// Utf8 entry, or refers to one holding an unpaired surrogate.
    pub fn utf8_at(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            ConstantPoolInfo::Utf8(value) => Ok(value),
            ConstantPoolInfo::Utf8Bytes(_) => Err(invalid_reference_error!(
                index,
                "Utf8 entry holds an unpaired surrogate and has no string form"
            )),
            other => Err(invalid_reference_error!(
                index,
                "expected a Utf8 entry, found {}",
                other.tag()
            )),
        }
    }

    /// Iterates over `(index, entry)` pairs in index order, skipping unusable slots.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &ConstantPoolInfo)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|entry| (slot as u16 + 1, entry)))
    }

    fn push(&mut self, entry: ConstantPoolInfo) -> u16 {
        let index = self.next_index();
        let slots = entry.slots();

        self.lookup.entry(entry.clone()).or_insert(index);
        self.entries.push(Some(entry));
        if slots == 2 {
            self.entries.push(None);
        }

        index
    }
}

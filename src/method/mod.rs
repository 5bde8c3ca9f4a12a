//! The `method_info` record (JVMS §4.6).
//!
//! A [`Method`] describes one method, constructor or class initializer of a class:
//!
//! ```text
//! u2             access_flags
//! u2             name_index
//! u2             descriptor_index
//! u2             attributes_count
//! attribute_info attributes[attributes_count]
//! ```
//!
//! # Lifecycle
//!
//! A record is either built directly ([`Method::new`], [`MethodBuilder`]) or decoded with
//! [`Method::read`]. Before it can be written, [`Method::resolve`] interns every string it
//! references; this has to happen for the whole class file before the first
//! [`Method::write`], because writing only looks indices up and never interns.
//!
//! ```rust
//! use jvmeta::{ClassReader, ClassWriter, ConstantPool, Method, MethodBuilder, MethodAccessFlags};
//!
//! let method = MethodBuilder::new("main", "([Ljava/lang/String;)V")
//!     .with(MethodAccessFlags::STATIC)
//!     .build();
//!
//! let mut pool = ConstantPool::new();
//! method.resolve(&mut pool)?;
//!
//! let mut writer = ClassWriter::new(&pool);
//! method.write(&mut writer)?;
//! let bytes = writer.into_bytes();
//! assert_eq!(bytes, [0x00, 0x09, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00]);
//!
//! let mut reader = ClassReader::new(&bytes, &pool);
//! assert_eq!(Method::read(&mut reader, None)?, method);
//! # Ok::<(), jvmeta::Error>(())
//! ```

use std::fmt;

use crate::{
    attributes::{Attribute, AttributeKind},
    constpool::ConstantPool,
    file::{reader::ClassReader, writer::ClassWriter},
    Result,
};

mod builder;
pub mod descriptor;
mod dump;
pub mod flags;
mod validate;

pub use builder::MethodBuilder;
pub use dump::MethodDump;
pub use flags::{MethodAccessFlags, MethodFlags};
pub use validate::{is_valid_method_name, validate, ValidationConfig, Violation};

/// A decoded `method_info` record.
///
/// Fields are public and may be assigned freely; the visibility rule is only normalized by
/// [`Method::new`], so direct assignment can produce records that [`validate`] flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name, or one of [`Method::INSTANCE_INITIALIZER`] / [`Method::CLASS_INITIALIZER`]
    pub name: String,
    /// Method descriptor, e.g. `(I)V`
    pub descriptor: String,
    /// Access and property flags
    pub flags: MethodFlags,
    /// Attributes in stream order
    pub attributes: Vec<Attribute>,
}

impl Method {
    /// Name of instance initialization methods.
    pub const INSTANCE_INITIALIZER: &'static str = "<init>";
    /// Name of the class initialization method.
    pub const CLASS_INITIALIZER: &'static str = "<clinit>";

    /// Creates a record, normalizing visibility so that at most one of public, private and
    /// protected is set (private wins over protected, protected over public).
    pub fn new(
        name: impl Into<String>,
        descriptor: impl Into<String>,
        flags: MethodFlags,
        attributes: Vec<Attribute>,
    ) -> Self {
        Method {
            name: name.into(),
            descriptor: descriptor.into(),
            flags: flags.normalized(),
            attributes,
        }
    }

    /// Reads a `method_info` record, including all of its attributes.
    ///
    /// Fields are consumed strictly in stream order and each pool index is resolved as soon as it
    /// is read, so an invalid name index fails before the descriptor index is touched. The
    /// declared attribute count is authoritative. Flag bits outside the twelve assigned ones are
    /// dropped, and conflicting visibility bits are normalized as in [`Method::new`].
    ///
    /// Only the resolved strings are kept, not the indices. Writing looks each string up again,
    /// so a record that pointed at a duplicate Utf8 entry is written with the first index at
    /// which that string appears in the pool.
    ///
    /// With `trace` set, a rendering of the record header is logged at that depth (see
    /// [`MethodDump`]) and attributes are traced two levels deeper.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the input ends inside the record and
    /// [`crate::Error::InvalidReference`] if the name or descriptor index is not a Utf8 entry.
    pub fn read(reader: &mut ClassReader, trace: Option<u32>) -> Result<Self> {
        let access_flags = reader.read_u2()?;
        let name = reader.read_utf8()?;
        let descriptor = reader.read_utf8()?;
        let attributes_count = reader.read_u2()?;

        if let Some(depth) = trace {
            crate::dump::emit(&MethodDump {
                name,
                descriptor,
                access_flags,
                attributes_count: usize::from(attributes_count),
                depth,
            });
        }

        let nested = trace.map(|depth| depth + 2);
        let mut attributes = Vec::new();
        for _ in 0..attributes_count {
            attributes.push(Attribute::read(reader, nested)?);
        }

        Ok(Method::new(
            name,
            descriptor,
            MethodFlags::from_access_flags(access_flags),
            attributes,
        ))
    }

    /// Interns name and descriptor into `pool`, then resolves every attribute in order.
    ///
    /// Interning is idempotent: resolving again, or resolving a record whose strings are already
    /// present, adds nothing.
    ///
    /// # Errors
    /// Propagates pool failures, see [`ConstantPool::add`].
    pub fn resolve(&self, pool: &mut ConstantPool) -> Result<()> {
        pool.add_utf8(&self.name)?;
        pool.add_utf8(&self.descriptor)?;
        for attribute in &self.attributes {
            attribute.resolve(pool)?;
        }
        Ok(())
    }

    /// Writes the record in the layout [`Method::read`] consumes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unresolved`] if a string was never interned and
    /// [`crate::Error::Malformed`] if there are more than 65535 attributes.
    pub fn write(&self, writer: &mut ClassWriter) -> Result<()> {
        let Ok(attributes_count) = u16::try_from(self.attributes.len()) else {
            return Err(malformed_error!(
                "Method {} has {} attributes, the count field holds at most {}",
                self.name,
                self.attributes.len(),
                u16::MAX
            ));
        };

        writer.write_u2(self.access_flags());
        writer.write_utf8(&self.name)?;
        writer.write_utf8(&self.descriptor)?;
        writer.write_u2(attributes_count);
        for attribute in &self.attributes {
            attribute.write(writer)?;
        }
        Ok(())
    }

    /// The packed `access_flags` word.
    #[must_use]
    pub fn access_flags(&self) -> u16 {
        self.flags.access_flags()
    }

    /// Number of attributes, always derived from the attribute list.
    #[must_use]
    pub fn attributes_count(&self) -> usize {
        self.attributes.len()
    }

    /// First attribute of the given kind.
    #[must_use]
    pub fn attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.kind() == kind)
    }

    /// Whether this is an instance initialization method (`<init>`).
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == Self::INSTANCE_INITIALIZER
    }

    /// Whether this is the class initialization method (`<clinit>`).
    #[must_use]
    pub fn is_class_initializer(&self) -> bool {
        self.name == Self::CLASS_INITIALIZER
    }

    /// Multi-line rendering of the record at the given nesting depth.
    #[must_use]
    pub fn dump(&self, depth: u32) -> MethodDump<'_> {
        MethodDump {
            name: &self.name,
            descriptor: &self.descriptor,
            access_flags: self.access_flags(),
            attributes_count: self.attributes.len(),
            depth,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Method access:0x{:04x} name:{}, descriptor:{}>",
            self.access_flags(),
            self.name,
            self.descriptor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{file::parser::Parser, Error};

    fn main_pool() -> ConstantPool {
        let mut pool = ConstantPool::new();
        for filler in ["java/lang/Object", "Code", "<init>", "()V"] {
            pool.add_utf8(filler).unwrap();
        }
        pool.add_utf8("main").unwrap();
        pool.add_utf8("([Ljava/lang/String;)V").unwrap();
        pool
    }

    #[test]
    fn crafted_main() {
        let pool = main_pool();

        #[rustfmt::skip]
        let data = [
            0x00, 0x01, // access_flags: public
            0x00, 0x05, // name: main
            0x00, 0x06, // descriptor
            0x00, 0x00, // attributes_count
        ];

        let mut reader = ClassReader::new(&data, &pool);
        let method = Method::read(&mut reader, None).unwrap();
        assert_eq!(reader.pos(), data.len());

        assert_eq!(method.name, "main");
        assert_eq!(method.descriptor, "([Ljava/lang/String;)V");
        assert_eq!(
            method.flags,
            MethodFlags {
                is_public: true,
                ..MethodFlags::none()
            }
        );
        assert!(method.attributes.is_empty());

        let mut writer = ClassWriter::new(&pool);
        method.write(&mut writer).unwrap();
        assert_eq!(writer.into_bytes(), data);
    }

    #[test]
    fn conflicting_visibility_normalized_on_read() {
        let pool = main_pool();
        let data = [0x00, 0x07, 0x00, 0x05, 0x00, 0x06, 0x00, 0x00];

        let mut reader = ClassReader::new(&data, &pool);
        let method = Method::read(&mut reader, None).unwrap();
        assert!(method.flags.is_private);
        assert_eq!(method.flags.visibility_count(), 1);

        let mut writer = ClassWriter::new(&pool);
        method.write(&mut writer).unwrap();
        assert_eq!(
            writer.into_bytes(),
            [0x00, 0x02, 0x00, 0x05, 0x00, 0x06, 0x00, 0x00]
        );
    }

    #[test]
    fn duplicate_utf8_written_with_first_index() {
        #[rustfmt::skip]
        let pool_bytes = [
            0x00, 0x04,
            0x01, 0x00, 0x04, b'm', b'a', b'i', b'n', // #1
            0x01, 0x00, 0x03, b'(', b')', b'V',       // #2
            0x01, 0x00, 0x04, b'm', b'a', b'i', b'n', // #3
        ];
        let mut parser = Parser::new(&pool_bytes);
        let pool = ConstantPool::read(&mut parser).unwrap();

        let data = [0x00, 0x01, 0x00, 0x03, 0x00, 0x02, 0x00, 0x00];
        let mut reader = ClassReader::new(&data, &pool);
        let method = Method::read(&mut reader, None).unwrap();
        assert_eq!(method.name, "main");

        let mut writer = ClassWriter::new(&pool);
        method.write(&mut writer).unwrap();
        assert_eq!(
            writer.into_bytes(),
            [0x00, 0x01, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00]
        );
    }

    #[test]
    fn dump_count_is_not_clamped() {
        let method = MethodBuilder::new("big", "()V")
            .attributes((0..70_000).map(|_| Attribute::new("Synthetic", Vec::new())))
            .build();
        let rendered = method.dump(0).to_string();
        assert_eq!(rendered.lines().nth(2), Some("    Attributes: (70000)"));
    }

    #[test]
    fn attributes_in_order_with_trace() {
        let pool = main_pool();

        #[rustfmt::skip]
        let data = [
            0x00, 0x09,
            0x00, 0x05,
            0x00, 0x06,
            0x00, 0x02,
            0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0xB1,
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
        ];

        let mut reader = ClassReader::new(&data, &pool);
        let method = Method::read(&mut reader, Some(1)).unwrap();
        assert_eq!(method.attributes_count(), 2);
        assert_eq!(method.attributes[0].name, "Code");
        assert_eq!(method.attributes[1].name, "java/lang/Object");
        assert_eq!(method.attribute(AttributeKind::Code).unwrap().info, [0xB1]);

        let mut writer = ClassWriter::new(&pool);
        method.write(&mut writer).unwrap();
        assert_eq!(writer.into_bytes(), data);
    }

    #[test]
    fn invalid_name_index_stops_reading() {
        let pool = main_pool();
        let data = [0x00, 0x01, 0x00, 0x32, 0x00, 0x06, 0x00, 0x00];

        let mut reader = ClassReader::new(&data, &pool);
        assert!(matches!(
            Method::read(&mut reader, None),
            Err(Error::InvalidReference { index: 0x32, .. })
        ));
        assert_eq!(reader.pos(), 4);
    }

    #[test]
    fn truncated_inside_attribute() {
        let pool = main_pool();
        let data = [
            0x00, 0x01, 0x00, 0x05, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00,
        ];

        let mut reader = ClassReader::new(&data, &pool);
        assert!(matches!(
            Method::read(&mut reader, None),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn resolve_is_idempotent() {
        let method = Method::new(
            "run",
            "()V",
            MethodFlags::default(),
            vec![Attribute::new("Deprecated", Vec::new())],
        );

        let mut pool = ConstantPool::new();
        method.resolve(&mut pool).unwrap();
        let first = (
            pool.utf8_index("run").unwrap(),
            pool.utf8_index("()V").unwrap(),
            pool.len(),
        );

        method.resolve(&mut pool).unwrap();
        let second = (
            pool.utf8_index("run").unwrap(),
            pool.utf8_index("()V").unwrap(),
            pool.len(),
        );
        assert_eq!(first, second);
        assert_eq!(first, (1, 2, 3));
    }

    #[test]
    fn write_without_resolve_fails() {
        let method = Method::new("run", "()V", MethodFlags::default(), Vec::new());
        let pool = ConstantPool::new();
        let mut writer = ClassWriter::new(&pool);
        assert!(matches!(method.write(&mut writer), Err(Error::Unresolved(_))));
    }

    #[test]
    fn new_normalizes_visibility() {
        let flags = MethodFlags {
            is_public: true,
            is_private: true,
            is_protected: true,
            ..MethodFlags::none()
        };
        let method = Method::new("helper", "()V", flags, Vec::new());
        assert!(method.flags.is_private);
        assert!(!method.flags.is_protected);
        assert!(!method.flags.is_public);
        assert_eq!(method.access_flags(), 0x0002);
    }

    #[test]
    fn special_names_and_display() {
        let init = Method::new("<init>", "()V", MethodFlags::default(), Vec::new());
        assert!(init.is_constructor());
        assert!(!init.is_class_initializer());
        assert_eq!(
            init.to_string(),
            "<Method access:0x0001 name:<init>, descriptor:()V>"
        );
        assert_eq!(
            init.dump(0).to_string(),
            "Method <init> ()V\n    Flags: 0x0001 (public)\n    Attributes: (0)"
        );
    }
}

//! Opaque attribute records (JVMS §4.7).
//!
//! Every attribute shares the same outer layout:
//!
//! ```text
//! u2 attribute_name_index
//! u4 attribute_length
//! u1 info[attribute_length]
//! ```
//!
//! [`Attribute`] keeps the name and the raw `info` bytes and never looks inside them. That is
//! enough to sequence attributes through a read / resolve / write cycle bit-exactly; code
//! bodies, exception tables and annotations are left to whoever consumes the payload.
//! [`AttributeKind`] classifies the name against the attributes the JVMS defines.

use std::fmt;

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{
    constpool::ConstantPool,
    dump::{self, Indent},
    file::{reader::ClassReader, writer::ClassWriter},
    Result,
};

/// The attribute names defined by the JVMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, IntoStaticStr)]
pub enum AttributeKind {
    /// `ConstantValue`
    ConstantValue,
    /// `Code`
    Code,
    /// `StackMapTable`
    StackMapTable,
    /// `Exceptions`
    Exceptions,
    /// `InnerClasses`
    InnerClasses,
    /// `EnclosingMethod`
    EnclosingMethod,
    /// `Synthetic`
    Synthetic,
    /// `Signature`
    Signature,
    /// `SourceFile`
    SourceFile,
    /// `SourceDebugExtension`
    SourceDebugExtension,
    /// `LineNumberTable`
    LineNumberTable,
    /// `LocalVariableTable`
    LocalVariableTable,
    /// `LocalVariableTypeTable`
    LocalVariableTypeTable,
    /// `Deprecated`
    Deprecated,
    /// `RuntimeVisibleAnnotations`
    RuntimeVisibleAnnotations,
    /// `RuntimeInvisibleAnnotations`
    RuntimeInvisibleAnnotations,
    /// `RuntimeVisibleParameterAnnotations`
    RuntimeVisibleParameterAnnotations,
    /// `RuntimeInvisibleParameterAnnotations`
    RuntimeInvisibleParameterAnnotations,
    /// `RuntimeVisibleTypeAnnotations`
    RuntimeVisibleTypeAnnotations,
    /// `RuntimeInvisibleTypeAnnotations`
    RuntimeInvisibleTypeAnnotations,
    /// `AnnotationDefault`
    AnnotationDefault,
    /// `BootstrapMethods`
    BootstrapMethods,
    /// `MethodParameters`
    MethodParameters,
    /// `Module`
    Module,
    /// `ModulePackages`
    ModulePackages,
    /// `ModuleMainClass`
    ModuleMainClass,
    /// `NestHost`
    NestHost,
    /// `NestMembers`
    NestMembers,
    /// `Record`
    Record,
    /// `PermittedSubclasses`
    PermittedSubclasses,
    /// Any name the JVMS does not define. Such attributes must be silently carried along.
    Unknown,
}

impl AttributeKind {
    /// Classifies an attribute name. Matching is exact and case sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(AttributeKind::Unknown)
    }

    /// Whether the JVMS lists this attribute as appearing in a `method_info` table (§4.7, Table
    /// 4.7-C).
    #[must_use]
    pub fn is_method_attribute(self) -> bool {
        matches!(
            self,
            AttributeKind::Code
                | AttributeKind::Exceptions
                | AttributeKind::Synthetic
                | AttributeKind::Signature
                | AttributeKind::Deprecated
                | AttributeKind::RuntimeVisibleAnnotations
                | AttributeKind::RuntimeInvisibleAnnotations
                | AttributeKind::RuntimeVisibleParameterAnnotations
                | AttributeKind::RuntimeInvisibleParameterAnnotations
                | AttributeKind::RuntimeVisibleTypeAnnotations
                | AttributeKind::RuntimeInvisibleTypeAnnotations
                | AttributeKind::AnnotationDefault
                | AttributeKind::MethodParameters
        )
    }
}

/// A named, variable-length attribute whose payload is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Attribute name, interned as a `CONSTANT_Utf8` entry on resolve
    pub name: String,
    /// The `info` bytes, uninterpreted
    pub info: Vec<u8>,
}

impl Attribute {
    /// Creates an attribute from its name and raw payload.
    pub fn new(name: impl Into<String>, info: Vec<u8>) -> Self {
        Attribute {
            name: name.into(),
            info,
        }
    }

    /// Classifies this attribute by name.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        AttributeKind::from_name(&self.name)
    }

    /// Reads one `attribute_info` structure.
    ///
    /// With `trace` set, a one-line rendering is emitted at that depth once the header is known.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidReference`] if the name index is not a Utf8 entry and
    /// [`crate::Error::OutOfBounds`] if the declared length runs past the input.
    pub fn read(reader: &mut ClassReader, trace: Option<u32>) -> Result<Self> {
        let name = reader.read_utf8()?;
        let length = reader.read_u4()?;

        if let Some(depth) = trace {
            dump::emit(&AttributeDump {
                name,
                length,
                depth,
            });
        }

        let info = reader.read_bytes(length as usize)?.to_vec();
        Ok(Attribute::new(name, info))
    }

    /// Interns the attribute name.
    ///
    /// # Errors
    /// Propagates pool failures, see [`ConstantPool::add`].
    pub fn resolve(&self, pool: &mut ConstantPool) -> Result<()> {
        pool.add_utf8(&self.name)?;
        Ok(())
    }

    /// Writes the attribute: name index, length, payload.
    ///
    /// # Errors
    /// Returns [`crate::Error::Unresolved`] if the name was never interned and
    /// [`crate::Error::Malformed`] if the payload does not fit a u4 length.
    pub fn write(&self, writer: &mut ClassWriter) -> Result<()> {
        let Ok(length) = u32::try_from(self.info.len()) else {
            return Err(malformed_error!(
                "Attribute {} payload of {} bytes exceeds the u4 length field",
                self.name,
                self.info.len()
            ));
        };

        writer.write_utf8(&self.name)?;
        writer.write_u4(length);
        writer.write_bytes(&self.info);
        Ok(())
    }
}

struct AttributeDump<'a> {
    name: &'a str,
    length: u32,
    depth: u32,
}

impl fmt::Display for AttributeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Attribute {} ({} bytes)",
            Indent(self.depth),
            self.name,
            self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn kinds() {
        assert_eq!(AttributeKind::from_name("Code"), AttributeKind::Code);
        assert_eq!(
            AttributeKind::from_name("AnnotationDefault"),
            AttributeKind::AnnotationDefault
        );
        assert_eq!(AttributeKind::from_name("code"), AttributeKind::Unknown);
        assert_eq!(AttributeKind::from_name("Unknown"), AttributeKind::Unknown);
        assert_eq!(AttributeKind::Exceptions.as_ref(), "Exceptions");
        assert_eq!(AttributeKind::Unknown.to_string(), "Unknown");
        assert!(AttributeKind::Code.is_method_attribute());
        assert!(!AttributeKind::SourceFile.is_method_attribute());
    }

    #[test]
    fn crafted_round_trip() {
        let mut pool = ConstantPool::new();
        pool.add_utf8("Deprecated").unwrap();
        pool.add_utf8("Exceptions").unwrap();

        #[rustfmt::skip]
        let data = [
            0x00, 0x02,             // name: Exceptions
            0x00, 0x00, 0x00, 0x04, // length
            0x00, 0x01, 0x00, 0x07, // payload
            0x00, 0x01,             // name: Deprecated
            0x00, 0x00, 0x00, 0x00, // length
        ];

        let mut reader = ClassReader::new(&data, &pool);
        let first = Attribute::read(&mut reader, None).unwrap();
        let second = Attribute::read(&mut reader, Some(2)).unwrap();
        assert!(!reader.has_more_data());

        assert_eq!(first.kind(), AttributeKind::Exceptions);
        assert_eq!(first.info, [0x00, 0x01, 0x00, 0x07]);
        assert_eq!(second, Attribute::new("Deprecated", Vec::new()));

        let mut writer = ClassWriter::new(&pool);
        first.write(&mut writer).unwrap();
        second.write(&mut writer).unwrap();
        assert_eq!(writer.into_bytes(), data);
    }

    #[test]
    fn declared_length_past_end() {
        let mut pool = ConstantPool::new();
        pool.add_utf8("Code").unwrap();

        let data = [0x00, 0x01, 0x00, 0x00, 0x01, 0x00, 0xCA, 0xFE];
        let mut reader = ClassReader::new(&data, &pool);
        assert!(matches!(
            Attribute::read(&mut reader, None),
            Err(Error::OutOfBounds { needed: 256, .. })
        ));
    }

    #[test]
    fn resolve_then_write() {
        let attribute = Attribute::new("com.example.Custom", vec![1, 2, 3]);
        let mut pool = ConstantPool::new();
        pool.add_utf8("filler").unwrap();

        {
            let mut writer = ClassWriter::new(&pool);
            assert!(matches!(
                attribute.write(&mut writer),
                Err(Error::Unresolved(_))
            ));
        }

        attribute.resolve(&mut pool).unwrap();
        let mut writer = ClassWriter::new(&pool);
        attribute.write(&mut writer).unwrap();
        assert_eq!(
            writer.into_bytes(),
            [0x00, 0x02, 0x00, 0x00, 0x00, 0x03, 1, 2, 3]
        );
        assert_eq!(attribute.kind(), AttributeKind::Unknown);
    }

    #[test]
    fn dump_line() {
        let rendered = AttributeDump {
            name: "Code",
            length: 12,
            depth: 1,
        }
        .to_string();
        assert_eq!(rendered, "    Attribute Code (12 bytes)");
    }
}

//! Constant pool entry kinds (JVMS §4.4).

use strum::{AsRefStr, Display, FromRepr};

use crate::{
    constpool::mutf8,
    file::{io::write_be_to, parser::Parser},
    Result,
};

/// Index into the constant pool. Valid indices start at 1.
#[allow(non_camel_case_types)]
pub type constant_pool_index = u16;

/// The one-byte tag that precedes every `cp_info` structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display, AsRefStr)]
#[repr(u8)]
pub enum ConstantTag {
    /// `CONSTANT_Utf8`
    Utf8 = 1,
    /// `CONSTANT_Integer`
    Integer = 3,
    /// `CONSTANT_Float`
    Float = 4,
    /// `CONSTANT_Long`
    Long = 5,
    /// `CONSTANT_Double`
    Double = 6,
    /// `CONSTANT_Class`
    Class = 7,
    /// `CONSTANT_String`
    String = 8,
    /// `CONSTANT_Fieldref`
    FieldRef = 9,
    /// `CONSTANT_Methodref`
    MethodRef = 10,
    /// `CONSTANT_InterfaceMethodref`
    InterfaceMethodRef = 11,
    /// `CONSTANT_NameAndType`
    NameAndType = 12,
    /// `CONSTANT_MethodHandle`
    MethodHandle = 15,
    /// `CONSTANT_MethodType`
    MethodType = 16,
    /// `CONSTANT_Dynamic`
    Dynamic = 17,
    /// `CONSTANT_InvokeDynamic`
    InvokeDynamic = 18,
    /// `CONSTANT_Module`
    Module = 19,
    /// `CONSTANT_Package`
    Package = 20,
}

/// A single constant pool entry.
///
/// Floating point constants are kept as their raw IEEE 754 bits so that entries can be hashed
/// and compared exactly (`NaN` payloads and `-0.0` survive a round trip and deduplicate
/// correctly).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstantPoolInfo {
    /// A string, decoded from modified UTF-8
    Utf8(String),
    /// A `CONSTANT_Utf8` entry whose code units contain an unpaired surrogate, kept as its
    /// modified UTF-8 bytes. [`ConstantPoolInfo::utf8_from_bytes`] produces it only when the
    /// units have no `String` form.
    Utf8Bytes(Vec<u8>),
    /// A 32-bit integer constant
    Integer(i32),
    /// A 32-bit float constant, as raw bits
    Float(u32),
    /// A 64-bit integer constant; occupies two pool slots
    Long(i64),
    /// A 64-bit float constant, as raw bits; occupies two pool slots
    Double(u64),
    /// A class or interface
    Class {
        /// Utf8 entry holding the binary name
        name_index: constant_pool_index,
    },
    /// A `java.lang.String` literal
    String {
        /// Utf8 entry holding the characters
        string_index: constant_pool_index,
    },
    /// A field reference
    FieldRef {
        /// Class entry of the owner
        class_index: constant_pool_index,
        /// NameAndType entry of the field
        name_and_type_index: constant_pool_index,
    },
    /// A method reference
    MethodRef {
        /// Class entry of the owner
        class_index: constant_pool_index,
        /// NameAndType entry of the method
        name_and_type_index: constant_pool_index,
    },
    /// An interface method reference
    InterfaceMethodRef {
        /// Class entry of the owner
        class_index: constant_pool_index,
        /// NameAndType entry of the method
        name_and_type_index: constant_pool_index,
    },
    /// A name and descriptor pair
    NameAndType {
        /// Utf8 entry holding the name
        name_index: constant_pool_index,
        /// Utf8 entry holding the descriptor
        descriptor_index: constant_pool_index,
    },
    /// A method handle
    MethodHandle {
        /// Bytecode behaviour of the handle, 1..=9
        reference_kind: u8,
        /// Field or method reference the handle points at
        reference_index: constant_pool_index,
    },
    /// A method type
    MethodType {
        /// Utf8 entry holding the method descriptor
        descriptor_index: constant_pool_index,
    },
    /// A dynamically-computed constant
    Dynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method_attr_index: u16,
        /// NameAndType entry of the constant
        name_and_type_index: constant_pool_index,
    },
    /// A dynamically-computed call site
    InvokeDynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method_attr_index: u16,
        /// NameAndType entry of the call site
        name_and_type_index: constant_pool_index,
    },
    /// A module
    Module {
        /// Utf8 entry holding the module name
        name_index: constant_pool_index,
    },
    /// A package exported or opened by a module
    Package {
        /// Utf8 entry holding the package name
        name_index: constant_pool_index,
    },
}

impl ConstantPoolInfo {
    /// The tag this entry is written with.
    #[must_use]
    pub fn tag(&self) -> ConstantTag {
        match self {
            ConstantPoolInfo::Utf8(_) | ConstantPoolInfo::Utf8Bytes(_) => ConstantTag::Utf8,
            ConstantPoolInfo::Integer(_) => ConstantTag::Integer,
            ConstantPoolInfo::Float(_) => ConstantTag::Float,
            ConstantPoolInfo::Long(_) => ConstantTag::Long,
            ConstantPoolInfo::Double(_) => ConstantTag::Double,
            ConstantPoolInfo::Class { .. } => ConstantTag::Class,
            ConstantPoolInfo::String { .. } => ConstantTag::String,
            ConstantPoolInfo::FieldRef { .. } => ConstantTag::FieldRef,
            ConstantPoolInfo::MethodRef { .. } => ConstantTag::MethodRef,
            ConstantPoolInfo::InterfaceMethodRef { .. } => ConstantTag::InterfaceMethodRef,
            ConstantPoolInfo::NameAndType { .. } => ConstantTag::NameAndType,
            ConstantPoolInfo::MethodHandle { .. } => ConstantTag::MethodHandle,
            ConstantPoolInfo::MethodType { .. } => ConstantTag::MethodType,
            ConstantPoolInfo::Dynamic { .. } => ConstantTag::Dynamic,
            ConstantPoolInfo::InvokeDynamic { .. } => ConstantTag::InvokeDynamic,
            ConstantPoolInfo::Module { .. } => ConstantTag::Module,
            ConstantPoolInfo::Package { .. } => ConstantTag::Package,
        }
    }

    /// Number of pool slots the entry takes up. Long and Double take two (JVMS §4.4.5).
    #[must_use]
    pub fn slots(&self) -> u16 {
        match self {
            ConstantPoolInfo::Long(_) | ConstantPoolInfo::Double(_) => 2,
            _ => 1,
        }
    }

    /// Builds a Utf8 entry from modified UTF-8 bytes: [`ConstantPoolInfo::Utf8`] when the
    /// code units form valid UTF-16, [`ConstantPoolInfo::Utf8Bytes`] otherwise.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the bytes are not valid modified UTF-8.
    pub fn utf8_from_bytes(bytes: &[u8]) -> Result<Self> {
        let units = mutf8::decode_units(bytes)?;
        Ok(match String::from_utf16(&units) {
            Ok(value) => ConstantPoolInfo::Utf8(value),
            Err(_) => ConstantPoolInfo::Utf8Bytes(bytes.to_vec()),
        })
    }

    /// Reads one `cp_info` structure, tag included.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on truncated input and [`crate::Error::Malformed`]
    /// for unknown tags or undecodable strings.
    pub fn read(parser: &mut Parser) -> Result<Self> {
        let tag_offset = parser.pos();
        let tag: u8 = parser.read_be()?;
        let Some(tag) = ConstantTag::from_repr(tag) else {
            return Err(malformed_error!(
                "Unknown constant pool tag {} at offset {}",
                tag,
                tag_offset
            ));
        };

        let entry = match tag {
            ConstantTag::Utf8 => {
                let length: u16 = parser.read_be()?;
                ConstantPoolInfo::utf8_from_bytes(parser.read_bytes(usize::from(length))?)?
            }
            ConstantTag::Integer => ConstantPoolInfo::Integer(parser.read_be()?),
            ConstantTag::Float => ConstantPoolInfo::Float(parser.read_be()?),
            ConstantTag::Long => ConstantPoolInfo::Long(parser.read_be()?),
            ConstantTag::Double => ConstantPoolInfo::Double(parser.read_be()?),
            ConstantTag::Class => ConstantPoolInfo::Class {
                name_index: parser.read_be()?,
            },
            ConstantTag::String => ConstantPoolInfo::String {
                string_index: parser.read_be()?,
            },
            ConstantTag::FieldRef => ConstantPoolInfo::FieldRef {
                class_index: parser.read_be()?,
                name_and_type_index: parser.read_be()?,
            },
            ConstantTag::MethodRef => ConstantPoolInfo::MethodRef {
                class_index: parser.read_be()?,
                name_and_type_index: parser.read_be()?,
            },
            ConstantTag::InterfaceMethodRef => ConstantPoolInfo::InterfaceMethodRef {
                class_index: parser.read_be()?,
                name_and_type_index: parser.read_be()?,
            },
            ConstantTag::NameAndType => ConstantPoolInfo::NameAndType {
                name_index: parser.read_be()?,
                descriptor_index: parser.read_be()?,
            },
            ConstantTag::MethodHandle => ConstantPoolInfo::MethodHandle {
                reference_kind: parser.read_be()?,
                reference_index: parser.read_be()?,
            },
            ConstantTag::MethodType => ConstantPoolInfo::MethodType {
                descriptor_index: parser.read_be()?,
            },
            ConstantTag::Dynamic => ConstantPoolInfo::Dynamic {
                bootstrap_method_attr_index: parser.read_be()?,
                name_and_type_index: parser.read_be()?,
            },
            ConstantTag::InvokeDynamic => ConstantPoolInfo::InvokeDynamic {
                bootstrap_method_attr_index: parser.read_be()?,
                name_and_type_index: parser.read_be()?,
            },
            ConstantTag::Module => ConstantPoolInfo::Module {
                name_index: parser.read_be()?,
            },
            ConstantTag::Package => ConstantPoolInfo::Package {
                name_index: parser.read_be()?,
            },
        };

        Ok(entry)
    }

    /// Appends the `cp_info` structure, tag included.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a Utf8 entry does not fit its u2 length field.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        write_be_to(out, self.tag() as u8);

        match self {
            ConstantPoolInfo::Utf8(value) => write_utf8_bytes(out, &mutf8::encode(value))?,
            ConstantPoolInfo::Utf8Bytes(bytes) => write_utf8_bytes(out, bytes)?,
            ConstantPoolInfo::Integer(value) => write_be_to(out, *value),
            ConstantPoolInfo::Float(bits) => write_be_to(out, *bits),
            ConstantPoolInfo::Long(value) => write_be_to(out, *value),
            ConstantPoolInfo::Double(bits) => write_be_to(out, *bits),
            ConstantPoolInfo::Class { name_index }
            | ConstantPoolInfo::Module { name_index }
            | ConstantPoolInfo::Package { name_index } => write_be_to(out, *name_index),
            ConstantPoolInfo::String { string_index } => write_be_to(out, *string_index),
            ConstantPoolInfo::MethodType { descriptor_index } => {
                write_be_to(out, *descriptor_index);
            }
            ConstantPoolInfo::FieldRef {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolInfo::MethodRef {
                class_index,
                name_and_type_index,
            }
            | ConstantPoolInfo::InterfaceMethodRef {
                class_index,
                name_and_type_index,
            } => {
                write_be_to(out, *class_index);
                write_be_to(out, *name_and_type_index);
            }
            ConstantPoolInfo::NameAndType {
                name_index,
                descriptor_index,
            } => {
                write_be_to(out, *name_index);
                write_be_to(out, *descriptor_index);
            }
            ConstantPoolInfo::MethodHandle {
                reference_kind,
                reference_index,
            } => {
                write_be_to(out, *reference_kind);
                write_be_to(out, *reference_index);
            }
            ConstantPoolInfo::Dynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            }
            | ConstantPoolInfo::InvokeDynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            } => {
                write_be_to(out, *bootstrap_method_attr_index);
                write_be_to(out, *name_and_type_index);
            }
        }

        Ok(())
    }
}

fn write_utf8_bytes(out: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
    let Ok(length) = u16::try_from(bytes.len()) else {
        return Err(malformed_error!(
            "Utf8 constant of {} bytes exceeds the u2 length field",
            bytes.len()
        ));
    };
    write_be_to(out, length);
    out.extend_from_slice(bytes);
    Ok(())
}

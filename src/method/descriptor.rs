//! Method descriptor grammar (JVMS §4.3.3).
//!
//! ```text
//! MethodDescriptor: ( {ParameterDescriptor} ) ReturnDescriptor
//! ReturnDescriptor: FieldType | V
//! FieldType:        B | C | D | F | I | J | S | Z | L ClassName ; | [ FieldType
//! ```
//!
//! The codec itself treats descriptors as opaque strings; parsing only happens on demand, e.g.
//! from [`crate::validate`].

use std::fmt;

use crate::{file::parser::Parser, Result};

/// Maximum number of array dimensions a descriptor may declare.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// A field type appearing as parameter or return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `B`
    Byte,
    /// `C`
    Char,
    /// `D`
    Double,
    /// `F`
    Float,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `S`
    Short,
    /// `Z`
    Boolean,
    /// `L<binary name>;`, with `/` separators
    Object(String),
    /// `[`, followed by the component type
    Array(Box<FieldType>),
}

impl FieldType {
    /// Number of local variable slots a parameter of this type occupies.
    #[must_use]
    pub fn slots(&self) -> usize {
        match self {
            FieldType::Long | FieldType::Double => 2,
            _ => 1,
        }
    }

    /// Array nesting depth; zero for non-array types.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        let mut dims = 0;
        let mut current = self;
        while let FieldType::Array(component) = current {
            dims += 1;
            current = component;
        }
        dims
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Byte => f.write_str("B"),
            FieldType::Char => f.write_str("C"),
            FieldType::Double => f.write_str("D"),
            FieldType::Float => f.write_str("F"),
            FieldType::Int => f.write_str("I"),
            FieldType::Long => f.write_str("J"),
            FieldType::Short => f.write_str("S"),
            FieldType::Boolean => f.write_str("Z"),
            FieldType::Object(name) => write!(f, "L{name};"),
            FieldType::Array(component) => write!(f, "[{component}"),
        }
    }
}

/// A parsed method descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Parameter types in declaration order
    pub params: Vec<FieldType>,
    /// Return type, `None` for `V`
    pub ret: Option<FieldType>,
}

impl MethodDescriptor {
    /// Parses a descriptor string.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `descriptor` does not match the grammar, declares
    /// more than 255 array dimensions, or has trailing characters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jvmeta::method::descriptor::{FieldType, MethodDescriptor};
    ///
    /// let parsed = MethodDescriptor::parse("(I[JLjava/lang/String;)V")?;
    /// assert_eq!(parsed.params.len(), 3);
    /// assert_eq!(parsed.params[0], FieldType::Int);
    /// assert!(parsed.ret.is_none());
    /// # Ok::<(), jvmeta::Error>(())
    /// ```
    pub fn parse(descriptor: &str) -> Result<Self> {
        let mut parser = Parser::new(descriptor.as_bytes());

        if parser.read_be::<u8>().ok() != Some(b'(') {
            return Err(malformed_error!(
                "Method descriptor {:?} must start with '('",
                descriptor
            ));
        }

        let mut params = Vec::new();
        loop {
            match parser.peek_byte() {
                Ok(b')') => break,
                Ok(_) => params.push(parse_field_type(&mut parser, descriptor)?),
                Err(_) => {
                    return Err(malformed_error!(
                        "Method descriptor {:?} is missing ')'",
                        descriptor
                    ))
                }
            }
        }
        parser.read_be::<u8>()?;

        let ret = if parser.peek_byte().ok() == Some(b'V') {
            parser.read_be::<u8>()?;
            None
        } else {
            Some(parse_field_type(&mut parser, descriptor)?)
        };

        if parser.has_more_data() {
            return Err(malformed_error!(
                "Method descriptor {:?} has trailing characters at {}",
                descriptor,
                parser.pos()
            ));
        }

        Ok(MethodDescriptor { params, ret })
    }

    /// Total local variable slots taken by the parameters, excluding `this`.
    #[must_use]
    pub fn param_slots(&self) -> usize {
        self.params.iter().map(FieldType::slots).sum()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for param in &self.params {
            write!(f, "{param}")?;
        }
        f.write_str(")")?;
        match &self.ret {
            Some(ret) => write!(f, "{ret}"),
            None => f.write_str("V"),
        }
    }
}

fn parse_field_type(parser: &mut Parser, descriptor: &str) -> Result<FieldType> {
    let mut dims = 0usize;
    while parser.peek_byte().ok() == Some(b'[') {
        parser.read_be::<u8>()?;
        dims += 1;
    }
    if dims > MAX_ARRAY_DIMENSIONS {
        return Err(malformed_error!(
            "Method descriptor {:?} declares {} array dimensions",
            descriptor,
            dims
        ));
    }

    let Ok(tag) = parser.read_be::<u8>() else {
        return Err(malformed_error!(
            "Method descriptor {:?} ends inside a field type",
            descriptor
        ));
    };

    let mut field = match tag {
        b'B' => FieldType::Byte,
        b'C' => FieldType::Char,
        b'D' => FieldType::Double,
        b'F' => FieldType::Float,
        b'I' => FieldType::Int,
        b'J' => FieldType::Long,
        b'S' => FieldType::Short,
        b'Z' => FieldType::Boolean,
        b'L' => FieldType::Object(parse_class_name(parser, descriptor)?),
        other => {
            return Err(malformed_error!(
                "Method descriptor {:?} has invalid type character {:?} at {}",
                descriptor,
                char::from(other),
                parser.pos() - 1
            ))
        }
    };

    for _ in 0..dims {
        field = FieldType::Array(Box::new(field));
    }
    Ok(field)
}

fn parse_class_name(parser: &mut Parser, descriptor: &str) -> Result<String> {
    let start = parser.pos();
    let rest = &descriptor[start..];
    let Some(length) = rest.find(';') else {
        return Err(malformed_error!(
            "Method descriptor {:?} has an unterminated class name at {}",
            descriptor,
            start
        ));
    };

    let name = &rest[..length];
    if name.is_empty()
        || name
            .split('/')
            .any(|segment| segment.is_empty() || segment.contains(['.', '[']))
    {
        return Err(malformed_error!(
            "Method descriptor {:?} has invalid class name {:?}",
            descriptor,
            name
        ));
    }

    parser.read_bytes(length + 1)?;
    Ok(name.to_string())
}

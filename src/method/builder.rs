//! Fluent construction of [`Method`] records.

use crate::{
    attributes::Attribute,
    method::{
        flags::{MethodAccessFlags, MethodFlags},
        Method,
    },
};

/// Builder for [`Method`] records.
///
/// Starts out as a public method without attributes. [`MethodBuilder::build`] goes through
/// [`Method::new`], so conflicting visibility flags are normalized the same way.
///
/// # Examples
///
/// ```rust
/// use jvmeta::{Attribute, MethodAccessFlags, MethodBuilder};
///
/// let method = MethodBuilder::new("<init>", "()V")
///     .access(MethodAccessFlags::PROTECTED)
///     .attribute(Attribute::new("Code", vec![0x00, 0x01, 0x00, 0x01]))
///     .build();
///
/// assert!(method.flags.is_protected);
/// assert_eq!(method.access_flags(), 0x0004);
/// assert_eq!(method.attributes_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    name: String,
    descriptor: String,
    flags: MethodFlags,
    attributes: Vec<Attribute>,
}

impl MethodBuilder {
    /// Creates a builder for a public method with the given name and descriptor.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            flags: MethodFlags::default(),
            attributes: Vec::new(),
        }
    }

    /// Replaces all flags.
    #[must_use]
    pub fn access(mut self, flags: MethodAccessFlags) -> Self {
        self.flags = MethodFlags::from(flags);
        self
    }

    /// Adds flags to the ones already set.
    #[must_use]
    pub fn with(mut self, flags: MethodAccessFlags) -> Self {
        self.flags = MethodFlags::from(MethodAccessFlags::from(self.flags) | flags);
        self
    }

    /// Replaces all flags with the boolean view.
    #[must_use]
    pub fn flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Appends an attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Appends several attributes, keeping their order.
    #[must_use]
    pub fn attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Builds the record.
    #[must_use]
    pub fn build(self) -> Method {
        Method::new(self.name, self.descriptor, self.flags, self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public() {
        let method = MethodBuilder::new("toString", "()Ljava/lang/String;").build();
        assert_eq!(method.access_flags(), 0x0001);
        assert!(method.attributes.is_empty());
    }

    #[test]
    fn access_replaces_with_adds() {
        let method = MethodBuilder::new("run", "()V")
            .access(MethodAccessFlags::ABSTRACT)
            .build();
        assert_eq!(method.access_flags(), 0x0400);

        let method = MethodBuilder::new("run", "()V")
            .with(MethodAccessFlags::STATIC | MethodAccessFlags::SYNCHRONIZED)
            .build();
        assert_eq!(method.access_flags(), 0x0029);
    }

    #[test]
    fn build_normalizes() {
        let method = MethodBuilder::new("run", "()V")
            .with(MethodAccessFlags::PRIVATE | MethodAccessFlags::PROTECTED)
            .build();
        assert_eq!(method.access_flags(), 0x0002);
    }

    #[test]
    fn attribute_order() {
        let method = MethodBuilder::new("run", "()V")
            .attribute(Attribute::new("A", vec![1]))
            .attributes([Attribute::new("B", vec![2]), Attribute::new("C", vec![3])])
            .build();
        let names: Vec<_> = method.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }
}

//! Access and property flags of a `method_info` record (JVMS §4.6, Table 4.6-A).
//!
//! Two views of the same twelve properties:
//! - [`MethodAccessFlags`]: the packed 16-bit mask as it appears on disk
//! - [`MethodFlags`]: one boolean per property, the view callers edit
//!
//! Converting mask to booleans drops every bit outside the twelve assigned ones. Converting
//! back sets exactly the bits of the properties that are true, so the round trip is exact for
//! any mask made of assigned bits only.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Method `access_flags` bits
    pub struct MethodAccessFlags: u16 {
        /// Declared public; may be accessed from outside its package
        const PUBLIC = 0x0001;
        /// Declared private; accessible only within the defining class
        const PRIVATE = 0x0002;
        /// Declared protected; may be accessed within subclasses
        const PROTECTED = 0x0004;
        /// Declared static
        const STATIC = 0x0008;
        /// Declared final; must not be overridden
        const FINAL = 0x0010;
        /// Declared synchronized; invocation is wrapped by a monitor use
        const SYNCHRONIZED = 0x0020;
        /// A bridge method, generated by the compiler
        const BRIDGE = 0x0040;
        /// Declared with variable number of arguments
        const VARARGS = 0x0080;
        /// Declared native; implemented in a language other than Java
        const NATIVE = 0x0100;
        /// Declared abstract; no implementation is provided
        const ABSTRACT = 0x0400;
        /// Floating-point mode is FP-strict
        const STRICT = 0x0800;
        /// Not present in the source code
        const SYNTHETIC = 0x1000;
    }
}

/// Flag bits paired with their rendering names, in bit-table order.
pub static FLAG_NAMES: [(MethodAccessFlags, &str); 12] = [
    (MethodAccessFlags::PUBLIC, "public"),
    (MethodAccessFlags::PRIVATE, "private"),
    (MethodAccessFlags::PROTECTED, "protected"),
    (MethodAccessFlags::STATIC, "static"),
    (MethodAccessFlags::FINAL, "final"),
    (MethodAccessFlags::SYNCHRONIZED, "synchronized"),
    (MethodAccessFlags::BRIDGE, "bridge"),
    (MethodAccessFlags::VARARGS, "varargs"),
    (MethodAccessFlags::NATIVE, "native"),
    (MethodAccessFlags::ABSTRACT, "abstract"),
    (MethodAccessFlags::STRICT, "strict"),
    (MethodAccessFlags::SYNTHETIC, "synthetic"),
];

impl MethodAccessFlags {
    /// Decodes a raw `access_flags` word, dropping unassigned bits.
    #[must_use]
    pub fn from_access_flags(flags: u16) -> Self {
        Self::from_bits_truncate(flags)
    }

    /// Names of the set flags, in bit-table order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        FLAG_NAMES
            .iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
    }
}

/// The twelve method properties as independent booleans.
///
/// Nothing here enforces the visibility rule; [`MethodFlags::normalized`] does, and
/// [`crate::Method::new`] always applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct MethodFlags {
    /// `ACC_PUBLIC`
    pub is_public: bool,
    /// `ACC_PRIVATE`
    pub is_private: bool,
    /// `ACC_PROTECTED`
    pub is_protected: bool,
    /// `ACC_STATIC`
    pub is_static: bool,
    /// `ACC_FINAL`
    pub is_final: bool,
    /// `ACC_SYNCHRONIZED`
    pub is_synchronized: bool,
    /// `ACC_BRIDGE`
    pub is_bridge: bool,
    /// `ACC_VARARGS`
    pub is_varargs: bool,
    /// `ACC_NATIVE`
    pub is_native: bool,
    /// `ACC_ABSTRACT`
    pub is_abstract: bool,
    /// `ACC_STRICT`
    pub is_strict: bool,
    /// `ACC_SYNTHETIC`
    pub is_synthetic: bool,
}

impl Default for MethodFlags {
    /// A plain public method.
    fn default() -> Self {
        MethodFlags {
            is_public: true,
            ..Self::none()
        }
    }
}

impl MethodFlags {
    /// All twelve properties false (package-private, no modifiers).
    #[must_use]
    pub const fn none() -> Self {
        MethodFlags {
            is_public: false,
            is_private: false,
            is_protected: false,
            is_static: false,
            is_final: false,
            is_synchronized: false,
            is_bridge: false,
            is_varargs: false,
            is_native: false,
            is_abstract: false,
            is_strict: false,
            is_synthetic: false,
        }
    }

    /// Decodes a raw `access_flags` word. Unassigned bits are ignored.
    #[must_use]
    pub fn from_access_flags(flags: u16) -> Self {
        Self::from(MethodAccessFlags::from_access_flags(flags))
    }

    /// Encodes the properties back into an `access_flags` word.
    #[must_use]
    pub fn access_flags(&self) -> u16 {
        MethodAccessFlags::from(*self).bits()
    }

    /// Resolves conflicting visibility by priority: private wins over protected, protected over
    /// public.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.is_private {
            self.is_protected = false;
            self.is_public = false;
        } else if self.is_protected {
            self.is_public = false;
        }
        self
    }

    /// Number of visibility properties set.
    #[must_use]
    pub fn visibility_count(&self) -> usize {
        [self.is_public, self.is_private, self.is_protected]
            .into_iter()
            .filter(|set| *set)
            .count()
    }
}

impl From<MethodAccessFlags> for MethodFlags {
    fn from(flags: MethodAccessFlags) -> Self {
        MethodFlags {
            is_public: flags.contains(MethodAccessFlags::PUBLIC),
            is_private: flags.contains(MethodAccessFlags::PRIVATE),
            is_protected: flags.contains(MethodAccessFlags::PROTECTED),
            is_static: flags.contains(MethodAccessFlags::STATIC),
            is_final: flags.contains(MethodAccessFlags::FINAL),
            is_synchronized: flags.contains(MethodAccessFlags::SYNCHRONIZED),
            is_bridge: flags.contains(MethodAccessFlags::BRIDGE),
            is_varargs: flags.contains(MethodAccessFlags::VARARGS),
            is_native: flags.contains(MethodAccessFlags::NATIVE),
            is_abstract: flags.contains(MethodAccessFlags::ABSTRACT),
            is_strict: flags.contains(MethodAccessFlags::STRICT),
            is_synthetic: flags.contains(MethodAccessFlags::SYNTHETIC),
        }
    }
}

impl From<MethodFlags> for MethodAccessFlags {
    fn from(flags: MethodFlags) -> Self {
        let mut bits = MethodAccessFlags::empty();
        bits.set(MethodAccessFlags::PUBLIC, flags.is_public);
        bits.set(MethodAccessFlags::PRIVATE, flags.is_private);
        bits.set(MethodAccessFlags::PROTECTED, flags.is_protected);
        bits.set(MethodAccessFlags::STATIC, flags.is_static);
        bits.set(MethodAccessFlags::FINAL, flags.is_final);
        bits.set(MethodAccessFlags::SYNCHRONIZED, flags.is_synchronized);
        bits.set(MethodAccessFlags::BRIDGE, flags.is_bridge);
        bits.set(MethodAccessFlags::VARARGS, flags.is_varargs);
        bits.set(MethodAccessFlags::NATIVE, flags.is_native);
        bits.set(MethodAccessFlags::ABSTRACT, flags.is_abstract);
        bits.set(MethodAccessFlags::STRICT, flags.is_strict);
        bits.set(MethodAccessFlags::SYNTHETIC, flags.is_synthetic);
        bits
    }
}

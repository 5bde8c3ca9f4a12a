//! Optional legality checks for method records (JVMS §4.6, §4.2.2, §4.3.3).
//!
//! Neither reading nor writing ever rejects a record on these grounds; callers that want
//! strict checking run [`validate`] explicitly and decide what to do with the findings.

use thiserror::Error;

use crate::{
    attributes::AttributeKind,
    method::{descriptor::MethodDescriptor, flags::MethodAccessFlags, Method},
};

/// Selects which rule groups [`validate`] applies.
///
/// The flag exclusivity rules for visibility and `abstract` are always checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// The method belongs to an interface: it has to be public and abstract, with only
    /// `varargs`, `bridge` and `synthetic` allowed on top
    pub interface_method: bool,

    /// Restrict the flags of `<init>` (`<clinit>` is exempt from flag rules)
    pub check_special_methods: bool,

    /// Require `<init>`, `<clinit>` or a valid unqualified name
    pub check_name: bool,

    /// Require the descriptor to match the method descriptor grammar
    pub check_descriptor: bool,

    /// Require exactly one `Code` attribute on concrete methods and none on abstract or native
    /// ones. Off by default, since records assembled in memory often carry no code yet
    pub check_code: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            interface_method: false,
            check_special_methods: true,
            check_name: true,
            check_descriptor: true,
            check_code: false,
        }
    }
}

impl ValidationConfig {
    /// Default checks, applied to a method declared in an interface
    #[must_use]
    pub fn interface() -> Self {
        Self {
            interface_method: true,
            ..Self::default()
        }
    }

    /// Every check enabled, including `Code` presence
    #[must_use]
    pub fn strict() -> Self {
        Self {
            check_code: true,
            ..Self::default()
        }
    }

    /// Only the always-on flag exclusivity rules
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            interface_method: false,
            check_special_methods: false,
            check_name: false,
            check_descriptor: false,
            check_code: false,
        }
    }
}

/// A single rule a method record breaks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// More than one of public, private and protected is set
    #[error("At most one of public, private and protected may be set, found {0}")]
    ConflictingVisibility(usize),

    /// An abstract method carries a flag abstract excludes
    #[error("Abstract method must not be {0}")]
    AbstractConflict(&'static str),

    /// An interface method lacks a required flag
    #[error("Interface method must be {0}")]
    InterfaceMissing(&'static str),

    /// An interface method carries a flag interfaces do not allow
    #[error("Interface method must not be {0}")]
    InterfaceForbidden(&'static str),

    /// `<init>` carries a flag instance initializers do not allow
    #[error("Instance initializer must not be {0}")]
    InitializerForbidden(&'static str),

    /// `<init>` does not return void
    #[error("Instance initializer must return void, descriptor is {0}")]
    InitializerReturn(String),

    /// The name is neither a special method name nor a valid unqualified name
    #[error("Invalid method name {0:?}")]
    InvalidName(String),

    /// The descriptor does not match the grammar
    #[error("Invalid method descriptor {0:?}")]
    InvalidDescriptor(String),

    /// An abstract or native method has a `Code` attribute
    #[error("{0} method must not have a Code attribute")]
    UnexpectedCode(&'static str),

    /// A concrete method does not have exactly one `Code` attribute
    #[error("Method must have exactly one Code attribute, found {0}")]
    CodeCount(usize),
}

const ABSTRACT_EXCLUDES: [(MethodAccessFlags, &str); 6] = [
    (MethodAccessFlags::FINAL, "final"),
    (MethodAccessFlags::NATIVE, "native"),
    (MethodAccessFlags::PRIVATE, "private"),
    (MethodAccessFlags::STATIC, "static"),
    (MethodAccessFlags::STRICT, "strict"),
    (MethodAccessFlags::SYNCHRONIZED, "synchronized"),
];

const INTERFACE_ALLOWED: MethodAccessFlags = MethodAccessFlags::PUBLIC
    .union(MethodAccessFlags::ABSTRACT)
    .union(MethodAccessFlags::VARARGS)
    .union(MethodAccessFlags::BRIDGE)
    .union(MethodAccessFlags::SYNTHETIC);

const INIT_ALLOWED: MethodAccessFlags = MethodAccessFlags::PUBLIC
    .union(MethodAccessFlags::PRIVATE)
    .union(MethodAccessFlags::PROTECTED)
    .union(MethodAccessFlags::STRICT)
    .union(MethodAccessFlags::VARARGS)
    .union(MethodAccessFlags::SYNTHETIC);

/// Checks `method` against the rules selected by `config`.
///
/// Returns every violation found, in rule order; an empty list means the record is legal.
///
/// # Examples
///
/// ```rust
/// use jvmeta::{validate, MethodAccessFlags, MethodBuilder, ValidationConfig, Violation};
///
/// let method = MethodBuilder::new("run", "()V")
///     .with(MethodAccessFlags::ABSTRACT | MethodAccessFlags::FINAL)
///     .build();
///
/// let violations = validate(&method, &ValidationConfig::default());
/// assert_eq!(violations, [Violation::AbstractConflict("final")]);
/// ```
#[must_use]
pub fn validate(method: &Method, config: &ValidationConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let flags = MethodAccessFlags::from(method.flags);

    let visibility = method.flags.visibility_count();
    if visibility > 1 {
        violations.push(Violation::ConflictingVisibility(visibility));
    }

    if method.flags.is_abstract {
        for (flag, name) in ABSTRACT_EXCLUDES {
            if flags.contains(flag) {
                violations.push(Violation::AbstractConflict(name));
            }
        }
    }

    let is_clinit = method.is_class_initializer();
    if config.interface_method && !is_clinit {
        check_interface(flags, &mut violations);
    }

    if config.check_special_methods && method.is_constructor() {
        for name in flags.difference(INIT_ALLOWED).names() {
            violations.push(Violation::InitializerForbidden(name));
        }
        if !method.descriptor.ends_with(")V") {
            violations.push(Violation::InitializerReturn(method.descriptor.clone()));
        }
    }

    if config.check_name && !is_valid_method_name(&method.name) {
        violations.push(Violation::InvalidName(method.name.clone()));
    }

    if config.check_descriptor && MethodDescriptor::parse(&method.descriptor).is_err() {
        violations.push(Violation::InvalidDescriptor(method.descriptor.clone()));
    }

    if config.check_code {
        check_code(method, &mut violations);
    }

    violations
}

/// Whether `name` may be used as a method name: `<init>`, `<clinit>`, or an unqualified name
/// free of `. ; [ / < >`.
#[must_use]
pub fn is_valid_method_name(name: &str) -> bool {
    if name == Method::INSTANCE_INITIALIZER || name == Method::CLASS_INITIALIZER {
        return true;
    }
    !name.is_empty() && !name.contains(['.', ';', '[', '/', '<', '>'])
}

fn check_interface(flags: MethodAccessFlags, violations: &mut Vec<Violation>) {
    if !flags.contains(MethodAccessFlags::PUBLIC) {
        violations.push(Violation::InterfaceMissing("public"));
    }
    if !flags.contains(MethodAccessFlags::ABSTRACT) {
        violations.push(Violation::InterfaceMissing("abstract"));
    }
    for name in flags.difference(INTERFACE_ALLOWED).names() {
        violations.push(Violation::InterfaceForbidden(name));
    }
}

fn check_code(method: &Method, violations: &mut Vec<Violation>) {
    let code = method
        .attributes
        .iter()
        .filter(|attribute| attribute.kind() == AttributeKind::Code)
        .count();

    let bodiless = if method.flags.is_abstract {
        Some("Abstract")
    } else if method.flags.is_native {
        Some("Native")
    } else {
        None
    };

    match bodiless {
        Some(kind) if code > 0 => violations.push(Violation::UnexpectedCode(kind)),
        None if code != 1 => violations.push(Violation::CodeCount(code)),
        _ => {}
    }
}

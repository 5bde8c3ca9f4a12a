//! Human-readable rendering of a `method_info` record.

use std::fmt;

use crate::{dump::Indent, method::flags::MethodAccessFlags};

/// Multi-line rendering of a method record's header, indented by nesting depth.
///
/// ```text
/// Method main ([Ljava/lang/String;)V
///     Flags: 0x0009 (public, static)
///     Attributes: (1)
/// ```
///
/// `access_flags` is shown as stored; names are only listed for assigned bits. Producing a
/// rendering has no effect on reading or writing.
#[derive(Debug, Clone, Copy)]
pub struct MethodDump<'a> {
    /// Method name
    pub name: &'a str,
    /// Method descriptor
    pub descriptor: &'a str,
    /// Raw flag word
    pub access_flags: u16,
    /// Attribute count
    pub attributes_count: usize,
    /// Nesting depth, four spaces each
    pub depth: u32,
}

impl fmt::Display for MethodDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = Indent(self.depth);
        writeln!(f, "{indent}Method {} {}", self.name, self.descriptor)?;

        write!(f, "{indent}    Flags: 0x{:04x}", self.access_flags)?;
        let names = MethodAccessFlags::from_access_flags(self.access_flags)
            .names()
            .collect::<Vec<_>>();
        if !names.is_empty() {
            write!(f, " ({})", names.join(", "))?;
        }
        writeln!(f)?;

        write!(f, "{indent}    Attributes: ({})", self.attributes_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_flags_and_count() {
        let dump = MethodDump {
            name: "main",
            descriptor: "([Ljava/lang/String;)V",
            access_flags: 0x0009,
            attributes_count: 1,
            depth: 1,
        };
        assert_eq!(
            dump.to_string(),
            "    Method main ([Ljava/lang/String;)V\n\
             \x20       Flags: 0x0009 (public, static)\n\
             \x20       Attributes: (1)"
        );
    }

    #[test]
    fn no_flag_list_when_empty() {
        let dump = MethodDump {
            name: "run",
            descriptor: "()V",
            access_flags: 0x8000,
            attributes_count: 0,
            depth: 0,
        };
        let rendered = dump.to_string();
        assert_eq!(rendered.lines().nth(1), Some("    Flags: 0x8000"));
    }
}

//! Shared pieces of the opt-in diagnostic rendering that `read` performs when given a depth.

use std::fmt;

/// Log target under which rendered records are emitted.
pub(crate) const DUMP_TARGET: &str = "jvmeta::dump";

/// Four spaces per nesting level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Indent(pub u32);

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("    ")?;
        }
        Ok(())
    }
}

/// Emits a rendering line by line at debug level.
pub(crate) fn emit(rendered: &dyn fmt::Display) {
    if !log::log_enabled!(target: DUMP_TARGET, log::Level::Debug) {
        return;
    }

    for line in rendered.to_string().lines() {
        log::debug!(target: DUMP_TARGET, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_width() {
        assert_eq!(Indent(0).to_string(), "");
        assert_eq!(Indent(2).to_string(), "        ");
    }
}

//! Reason text attached to failed and skipped results.

use std::fmt;

/// Source position of the expression a reason refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    file: &'static str,
    line: u32,
}

impl SourceLocation {
    pub fn new(file: &'static str, line: u32) -> Self {
        debug_assert!(line > 0);
        SourceLocation { file, line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Human-readable explanation for a non-passing result. Built from a source
/// location it carries a `<file>:<line>: ` prefix; built without one it is
/// the formatted message verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason(String);

impl Reason {
    pub fn new(location: Option<SourceLocation>, msg: fmt::Arguments<'_>) -> Self {
        let text = match location {
            Some(loc) => format!("{loc}: {msg}"),
            None => msg.to_string(),
        };
        Reason(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reason_is_verbatim() {
        let reason = Reason::new(None, format_args!("the \"{}\" daemon is down", "mixer"));
        assert_eq!(reason.as_str(), "the \"mixer\" daemon is down");
    }

    #[test]
    fn located_reason_gets_file_line_prefix() {
        let loc = SourceLocation::new("t_subsystem.c", 42);
        let reason = Reason::new(Some(loc), format_args!("bad value: {}", 7));
        assert_eq!(reason.as_str(), "t_subsystem.c:42: bad value: 7");
    }

    #[test]
    fn location_displays_as_file_colon_line() {
        assert_eq!(SourceLocation::new("main.rs", 9).to_string(), "main.rs:9");
    }

    #[test]
    fn into_string_moves_the_text_out() {
        let reason = Reason::new(None, format_args!("gone for {} reasons", 2));
        assert_eq!(reason.into_string(), "gone for 2 reasons");
    }
}

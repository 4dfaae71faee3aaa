//! Result-channel wire contract.
//!
//! This crate is the single source of truth for the one-line result record a
//! test-case process leaves behind, so both sides agree on it:
//! - the harness runtime (writer)
//! - supervising tools that collect result files (readers)
//!
//! The record is exactly one newline-terminated line: `<result>\n` or
//! `<result>: <reason>\n`, where `<result>` is one of `passed`, `failed`,
//! `skipped`. A `passed` record never carries a reason.

use std::fmt;

/// Reserved channel path meaning "write the record to standard output".
pub const RESFILE_STDOUT: &str = "/dev/stdout";

/// Reserved channel path meaning "write the record to standard error".
pub const RESFILE_STDERR: &str = "/dev/stderr";

/// Terminal result of one test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Passed,
    Failed,
    Skipped,
}

impl ResultKind {
    pub const ALL: [Self; 3] = [Self::Passed, Self::Failed, Self::Skipped];

    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::Passed => "passed",
            ResultKind::Failed => "failed",
            ResultKind::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passed" => Some(ResultKind::Passed),
            "failed" => Some(ResultKind::Failed),
            "skipped" => Some(ResultKind::Skipped),
            _ => None,
        }
    }

    /// True if a process reporting this result exits with a success status.
    /// Skipping is not a failure of the harness.
    pub fn process_success(self) -> bool {
        matches!(self, ResultKind::Passed | ResultKind::Skipped)
    }

    /// True if the record for this result may carry a reason.
    pub fn allows_reason(self) -> bool {
        !matches!(self, ResultKind::Passed)
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted result line, in parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub kind: ResultKind,
    pub reason: Option<String>,
}

impl ResultRecord {
    pub fn new(kind: ResultKind, reason: Option<String>) -> Self {
        debug_assert!(kind.allows_reason() || reason.is_none());
        ResultRecord { kind, reason }
    }

    /// Renders the record as the exact newline-terminated line the writer
    /// persists.
    pub fn render(&self) -> String {
        match &self.reason {
            None => format!("{}\n", self.kind.as_str()),
            Some(reason) => format!("{}: {}\n", self.kind.as_str(), reason),
        }
    }

    /// Parses one result line. Accepts an optional single trailing newline.
    /// Returns `None` for anything that is not a well-formed record,
    /// including a `passed` record carrying a reason.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        if line.contains('\n') {
            return None;
        }

        let (word, reason) = match line.split_once(": ") {
            Some((word, reason)) => (word, Some(reason.to_string())),
            None => (line, None),
        };

        let kind = ResultKind::parse(word)?;
        if reason.is_some() && !kind.allows_reason() {
            return None;
        }
        Some(ResultRecord { kind, reason })
    }
}

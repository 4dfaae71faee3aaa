//! Last-resort error reporting.
//!
//! A fatal error means the harness itself can no longer produce a trustworthy
//! result record. The message goes to stderr and the process aborts, leaving
//! no results file behind.

use std::fmt;

pub(crate) fn fatal_error(msg: fmt::Arguments<'_>) -> ! {
    eprintln!("FATAL ERROR: {msg}");
    std::process::abort()
}

macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::fatal::fatal_error(::core::format_args!($($arg)+))
    };
}

pub(crate) use fatal;

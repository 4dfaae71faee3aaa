//! Assertion macros for test bodies.
//!
//! Every macro captures its call site, so the recorded reason starts with
//! `<file>:<line>: `. The `require` family ends the test case on failure;
//! the `check` family records the failure and lets the body continue.

/// Fails the test case unless the condition holds. The one-argument form
/// reports `<condition> not met`; the long form takes a custom message.
#[macro_export]
macro_rules! require {
    ($cond:expr) => {
        if !$cond {
            $crate::fail_requirement_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!("{} not met", stringify!($cond)),
            );
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::fail_requirement_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!($($arg)+),
            );
        }
    };
}

/// Nonfatal counterpart of [`require!`]: a failed condition is counted and
/// reported but the body continues.
#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        if !$cond {
            $crate::fail_check_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!("{} not met", stringify!($cond)),
            );
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::fail_check_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!($($arg)+),
            );
        }
    };
}

/// Fails the test case unless the two expressions compare equal. The default
/// report is `<left> != <right>`; the long form appends `: <message>`.
#[macro_export]
macro_rules! require_eq {
    ($left:expr, $right:expr) => {
        let __attest_left = &$left;
        let __attest_right = &$right;
        if __attest_left != __attest_right {
            $crate::fail_requirement_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!("{} != {}", stringify!($left), stringify!($right)),
            );
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        let __attest_left = &$left;
        let __attest_right = &$right;
        if __attest_left != __attest_right {
            $crate::fail_requirement_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!(
                    "{} != {}: {}",
                    stringify!($left),
                    stringify!($right),
                    format_args!($($arg)+),
                ),
            );
        }
    };
}

/// Nonfatal counterpart of [`require_eq!`].
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr) => {
        let __attest_left = &$left;
        let __attest_right = &$right;
        if __attest_left != __attest_right {
            $crate::fail_check_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!("{} != {}", stringify!($left), stringify!($right)),
            );
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        let __attest_left = &$left;
        let __attest_right = &$right;
        if __attest_left != __attest_right {
            $crate::fail_check_at(
                $crate::SourceLocation::new(file!(), line!()),
                format_args!(
                    "{} != {}: {}",
                    stringify!($left),
                    stringify!($right),
                    format_args!($($arg)+),
                ),
            );
        }
    };
}

/// Evaluates a boolean expression and requires both a true result and a
/// matching errno observed immediately afterwards.
#[macro_export]
macro_rules! require_errno {
    ($exp_errno:expr, $expr:expr) => {
        let __attest_result = $expr;
        let __attest_errno = ::std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(0);
        $crate::check_errno(
            $crate::SourceLocation::new(file!(), line!()),
            $exp_errno,
            __attest_errno,
            stringify!($expr),
            __attest_result,
            $crate::Severity::Require,
        );
    };
}

/// Nonfatal counterpart of [`require_errno!`].
#[macro_export]
macro_rules! check_errno {
    ($exp_errno:expr, $expr:expr) => {
        let __attest_result = $expr;
        let __attest_errno = ::std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(0);
        $crate::check_errno(
            $crate::SourceLocation::new(file!(), line!()),
            $exp_errno,
            __attest_errno,
            stringify!($expr),
            __attest_result,
            $crate::Severity::Check,
        );
    };
}

//! Outcome engine and run driver.
//!
//! Terminal outcomes (pass, requirement failure, skip) write the result
//! record, consume the process-wide context, and then leave the test body
//! through the unwinding machinery with a private payload. [`run`] catches
//! that payload and reports the terminal kind to the caller, which keeps the
//! driver reusable for sequential test cases within one process. A genuine
//! panic escaping the body is recorded as a failure so the result record is
//! still written exactly once.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Once;

use attest_contracts::ResultKind;

use crate::context;
use crate::reason::{Reason, SourceLocation};
use crate::resfile;
use crate::testcase::TestCase;

/// Unwind payload raised by terminal outcomes. Never leaves this module.
struct Termination {
    kind: ResultKind,
}

/// Selects how an assertion failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Failure ends the test case immediately.
    Require,
    /// Failure is counted and the body keeps running.
    Check,
}

static SILENCE_HOOK: Once = Once::new();

/// Keeps the panic hook quiet for harness-driven termination while leaving
/// genuine panics fully reported.
fn silence_termination_panics() {
    SILENCE_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<Termination>().is_none() {
                previous(info);
            }
        }));
    });
}

fn terminate(kind: ResultKind) -> ! {
    panic::panic_any(Termination { kind })
}

fn conclude(kind: ResultKind, reason: Option<Reason>) -> ! {
    let ctx = context::take();
    resfile::create(&ctx.resfile, kind, reason);
    terminate(kind)
}

fn nonfatal(reason: Reason) {
    context::with_active(|ctx| {
        eprintln!("*** Check failed: {reason}");
        ctx.fail_count += 1;
    });
}

/// Ends the running test case as passed.
pub fn pass() -> ! {
    conclude(ResultKind::Passed, None)
}

/// Ends the running test case as failed. Nothing after the call site runs.
pub fn fail(reason: impl fmt::Display) -> ! {
    conclude(
        ResultKind::Failed,
        Some(Reason::new(None, format_args!("{reason}"))),
    )
}

/// Records a nonfatal check failure on standard error and returns to the
/// body.
pub fn fail_check(reason: impl fmt::Display) {
    nonfatal(Reason::new(None, format_args!("{reason}")));
}

/// Ends the running test case as skipped.
pub fn skip(reason: impl fmt::Display) -> ! {
    conclude(
        ResultKind::Skipped,
        Some(Reason::new(None, format_args!("{reason}"))),
    )
}

/// [`fail`] with a `<file>:<line>: ` reason prefix. Used by the assertion
/// macros.
pub fn fail_requirement_at(location: SourceLocation, args: fmt::Arguments<'_>) -> ! {
    conclude(
        ResultKind::Failed,
        Some(Reason::new(Some(location), args)),
    )
}

/// [`fail_check`] with a `<file>:<line>: ` reason prefix. Used by the
/// assertion macros.
pub fn fail_check_at(location: SourceLocation, args: fmt::Arguments<'_>) {
    nonfatal(Reason::new(Some(location), args));
}

/// Validates an errno-producing expression. A false `expr_result` fails on
/// its own; a true one fails when the errno observed right after evaluation
/// does not match `exp_errno`. At most one failure is reported per call.
pub fn check_errno(
    location: SourceLocation,
    exp_errno: i32,
    observed_errno: i32,
    expr: &str,
    expr_result: bool,
    severity: Severity,
) {
    if !expr_result {
        report(severity, location, format_args!("Expected true value in {expr}"));
    } else if observed_errno != exp_errno {
        report(
            severity,
            location,
            format_args!("Expected errno {exp_errno}, got {observed_errno}, in {expr}"),
        );
    }
}

fn report(severity: Severity, location: SourceLocation, args: fmt::Arguments<'_>) {
    match severity {
        Severity::Require => fail_requirement_at(location, args),
        Severity::Check => fail_check_at(location, args),
    }
}

/// Runs the body of `tc` and records its result to `resfile`.
///
/// Requires unwinding panics; `panic = "abort"` builds cannot host this
/// driver because terminal outcomes travel as unwinds.
pub fn run(tc: &TestCase, resfile: &Path) -> ResultKind {
    silence_termination_panics();
    context::begin(tc.ident(), resfile);

    let body = tc.body();
    match panic::catch_unwind(AssertUnwindSafe(|| body(tc))) {
        Ok(()) => finish_body(),
        Err(payload) => match payload.downcast::<Termination>() {
            Ok(termination) => termination.kind,
            Err(payload) => body_panicked(payload),
        },
    }
}

/// Normal body return: passed if no check failed, failed otherwise.
fn finish_body() -> ResultKind {
    let ctx = context::take();
    if ctx.fail_count == 0 {
        resfile::create(&ctx.resfile, ResultKind::Passed, None);
        ResultKind::Passed
    } else {
        let reason = Reason::new(
            None,
            format_args!(
                "{} checks failed; see output for more details",
                ctx.fail_count
            ),
        );
        resfile::create(&ctx.resfile, ResultKind::Failed, Some(reason));
        ResultKind::Failed
    }
}

/// Abrupt body termination: the panic hook already reported the panic, so
/// record the failure and keep the exactly-once write.
fn body_panicked(payload: Box<dyn Any + Send>) -> ResultKind {
    let msg = panic_message(payload.as_ref());
    let ctx = context::take();
    let reason = Reason::new(None, format_args!("test case body panicked: {msg}"));
    resfile::create(&ctx.resfile, ResultKind::Failed, Some(reason));
    ResultKind::Failed
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic payload"
    }
}

/// Invokes the cleanup hook of `tc`, if it has one. The supervising process
/// calls this after the body, outside the outcome state machine.
pub fn run_cleanup(tc: &TestCase) {
    if let Some(cleanup) = tc.cleanup() {
        cleanup(tc);
    }
}

/// Maps a terminal result to the exit status of the test program: success
/// for passed and skipped, failure for failed.
pub fn exit_code(kind: ResultKind) -> ExitCode {
    if kind.process_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

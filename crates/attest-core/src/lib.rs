//! Run-time core of a single-process unit-test harness.
//!
//! A supervising process instantiates one [`TestCase`] (usually through a
//! [`TestCaseDef`] registration table) and hands it to [`run`], which
//! executes the body and records the terminal outcome to a results file
//! exactly once, even when the body ends abruptly. Test bodies report
//! through the assertion macros ([`require!`], [`check!`],
//! [`require_errno!`], ...) or the explicit entry points ([`pass`],
//! [`fail`], [`skip`], [`fail_check`]).
//!
//! One process runs one test case at a time; parallelism belongs to the
//! supervising process, which spawns one process per test case. The result
//! record format and the reserved stream aliases live in `attest_contracts`.

mod context;
mod fatal;
mod macros;
mod outcome;
mod prog;
mod reason;
mod resfile;
mod testcase;

pub use outcome::{
    check_errno, exit_code, fail, fail_check, fail_check_at, fail_requirement_at, pass, run,
    run_cleanup, skip, Severity,
};
pub use prog::require_prog;
pub use reason::{Reason, SourceLocation};
pub use testcase::{BodyFn, CleanupFn, HeadFn, TestCase, TestCaseDef};

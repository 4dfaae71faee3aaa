//! Process-wide execution context.
//!
//! Exactly one test case may be running in a process at any time. The slot
//! here records which one, where its result record goes, and how many
//! nonfatal check failures it has accumulated so far. The slot is filled by
//! [`begin`] and emptied by [`take`] when a terminal outcome consumes it, so
//! a second result record for the same run has nothing left to consume.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::fatal::fatal;

pub(crate) struct RunContext {
    pub(crate) ident: String,
    pub(crate) resfile: PathBuf,
    pub(crate) fail_count: usize,
}

static CURRENT: Mutex<Option<RunContext>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<RunContext>> {
    match CURRENT.lock() {
        Ok(guard) => guard,
        Err(_) => fatal!("test case context lock is poisoned"),
    }
}

/// Installs the context for `ident`. Fatal if another test case is already
/// running in this process.
pub(crate) fn begin(ident: &str, resfile: &Path) {
    let mut current = slot();
    if let Some(active) = current.as_ref() {
        fatal!(
            "cannot run test case '{ident}': test case '{}' is already running in this process",
            active.ident
        );
    }
    *current = Some(RunContext {
        ident: ident.to_owned(),
        resfile: resfile.to_owned(),
        fail_count: 0,
    });
}

/// Removes and returns the active context. Fatal if none is active, which
/// means an outcome entry point was called outside a running test case.
pub(crate) fn take() -> RunContext {
    match slot().take() {
        Some(ctx) => ctx,
        None => fatal!("no test case is currently running in this process"),
    }
}

/// Runs `f` against the active context, keeping it installed. Fatal if none
/// is active.
pub(crate) fn with_active<R>(f: impl FnOnce(&mut RunContext) -> R) -> R {
    match slot().as_mut() {
        Some(ctx) => f(ctx),
        None => fatal!("no test case is currently running in this process"),
    }
}

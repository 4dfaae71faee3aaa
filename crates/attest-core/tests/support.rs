#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard};

/// Marks a process as the child half of a re-exec test.
pub const CHILD_ENV: &str = "ATTEST_TEST_CHILD";

static RUN_LOCK: Mutex<()> = Mutex::new(());

/// The execution context is process-wide, so every test that drives it
/// takes this lock first.
pub fn run_lock() -> MutexGuard<'static, ()> {
    RUN_LOCK.lock().unwrap()
}

pub fn is_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

pub fn create_temp_dir(prefix: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let base = std::env::temp_dir();
    let pid = std::process::id();
    for _ in 0..10_000 {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = base.join(format!("{prefix}_{pid}_{n}"));
        if std::fs::create_dir(&path).is_ok() {
            return path;
        }
    }
    panic!("failed to create temp dir under {}", base.display());
}

/// Re-runs the current test executable with only `test_name` selected and
/// the child marker set. Abort paths and the standard-stream result aliases
/// can only be observed from outside the process.
pub fn run_child(test_name: &str) -> Output {
    let exe = std::env::current_exe().expect("resolve current test executable");
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("run child test process")
}

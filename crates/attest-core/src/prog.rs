//! Program availability checker.

use std::path::{Path, PathBuf};

use crate::fatal::fatal;
use crate::outcome;

/// Checks that `prog` can be executed, ending the test case when it cannot.
///
/// An absolute path is probed directly; a miss skips the test case, since
/// the environment simply lacks an optional tool. A bare name is searched
/// through each PATH directory in order; a miss fails the test case, since
/// the test expects PATH to provide it. Any other relative path is fatal.
pub fn require_prog(prog: impl AsRef<Path>) {
    let prog = prog.as_ref();
    if prog.is_absolute() {
        if !is_executable(prog) {
            outcome::skip(format_args!(
                "The required program {} could not be found",
                prog.display()
            ));
        }
    } else if prog.components().count() != 1 {
        fatal!(
            "Relative paths are not allowed when searching for a program ({})",
            prog.display()
        );
    } else if find_in_path(prog).is_none() {
        outcome::fail(format_args!(
            "The required program {} could not be found in the PATH",
            prog.display()
        ));
    }
}

/// First PATH directory holding an executable `prog`. An unset PATH searches
/// nothing.
fn find_in_path(prog: &Path) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        let cand = dir.join(prog);
        if is_executable(&cand) {
            return Some(cand);
        }
    }
    None
}

fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        if let Ok(meta) = std::fs::metadata(path) {
            return meta.permissions().mode() & 0o111 != 0;
        }
        false
    }
    #[cfg(not(unix))]
    {
        true
    }
}

//! Results file creation.
//!
//! The results file holds exactly one record and is written exactly once, at
//! the moment the test case reaches its terminal result. The reserved paths
//! [`RESFILE_STDOUT`] and [`RESFILE_STDERR`] redirect the record to the
//! corresponding standard stream instead of creating a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use attest_contracts::{ResultKind, ResultRecord, RESFILE_STDERR, RESFILE_STDOUT};

use crate::fatal::fatal;
use crate::reason::Reason;

fn write_record(mut out: impl Write, record: &ResultRecord) -> io::Result<()> {
    out.write_all(record.render().as_bytes())?;
    out.flush()
}

/// Writes the result record to `resfile`, or to a standard stream when
/// `resfile` is one of the reserved paths. Takes the reason by value; it is
/// released into the record on every path.
pub(crate) fn try_create(resfile: &Path, kind: ResultKind, reason: Option<Reason>) -> Result<()> {
    let record = ResultRecord::new(kind, reason.map(Reason::into_string));

    let written = if resfile == Path::new(RESFILE_STDOUT) {
        write_record(io::stdout().lock(), &record)
    } else if resfile == Path::new(RESFILE_STDERR) {
        write_record(io::stderr().lock(), &record)
    } else {
        let file = File::create(resfile)
            .with_context(|| format!("Cannot create results file '{}'", resfile.display()))?;
        write_record(file, &record)
    };

    written.with_context(|| {
        format!(
            "Failed to write results file; result {}, reason {}",
            record.kind,
            record.reason.as_deref().unwrap_or("null")
        )
    })
}

/// Same as [`try_create`] but treats any error as fatal. A result we cannot
/// persist would make the test program's outcome bogus.
pub(crate) fn create(resfile: &Path, kind: ResultKind, reason: Option<Reason>) {
    if let Err(err) = try_create(resfile, kind, reason) {
        fatal!("{err:#}");
    }
}

//! Blocking filesystem round-trip.
//!
//! Writes formatted lines to a fresh temp file, closes it, reads it back,
//! deletes it, and counts newline bytes. Real files on a real filesystem; the
//! point is to pay for the syscalls.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{BurninError, Result};

/// Lines written per request.
pub const DEFAULT_LINES: usize = 1000;

const FILE_PREFIX: &str = "burnin-io-";

/// JSON body of a successful round-trip.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IoReport {
    pub status: &'static str,
    pub lines_written: usize,
}

/// Run one write/read/delete cycle inside `dir`.
///
/// Create, write and read failures abort the request. The temp file is
/// removed on every path; a failed removal after a successful read is only
/// logged.
pub fn file_roundtrip(dir: &Path, lines: usize) -> Result<IoReport> {
    let mut file = tempfile::Builder::new()
        .prefix(FILE_PREFIX)
        .suffix(".txt")
        .tempfile_in(dir)
        .map_err(|e| BurninError::Io(format!("Failed to create file: {e}")))?;

    {
        let mut w = BufWriter::new(&mut file);
        for i in 0..lines {
            writeln!(w, "Line {i}: burnin disk workload payload")
                .map_err(|e| BurninError::Io(format!("Failed to write file: {e}")))?;
        }
        w.flush()
            .map_err(|e| BurninError::Io(format!("Failed to write file: {e}")))?;
    }

    // Drops the open handle; the path is still unlinked when `path` drops.
    let path = file.into_temp_path();

    let data = fs::read(&path).map_err(|e| BurninError::Io(format!("Failed to read file: {e}")))?;
    let lines_written = data.iter().filter(|&&b| b == b'\n').count();

    let shown = path.to_path_buf();
    if let Err(e) = path.close() {
        tracing::warn!(path = %shown.display(), error = %e, "io workload temp file cleanup failed");
    }

    Ok(IoReport { status: "ok", lines_written })
}

//! Scratch-File Round Trip
//!
//! The per-core pipeline deliberately pushes its batch through disk: one
//! unsigned decimal per line, no header. The scratch file is exclusively
//! owned by its runner and is always deleted before the run ends, even when
//! the reload fails to parse.

use crate::HarnessError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `batch` to `path`, one value per line.
pub fn persist_batch(path: &Path, batch: &[u64]) -> Result<(), HarnessError> {
    let file = File::create(path).map_err(|e| HarnessError::io("persist", e))?;
    let mut writer = BufWriter::new(file);
    for value in batch {
        writeln!(writer, "{value}").map_err(|e| HarnessError::io("persist", e))?;
    }
    writer.flush().map_err(|e| HarnessError::io("persist", e))
}

/// Read the batch back from `path` and delete the file.
///
/// Deletion happens before parsing so cleanup is guaranteed even when the
/// contents are corrupt. A value that fails to parse is a
/// [`HarnessError::MalformedReload`]: it means the round-trip was broken by
/// an I/O or concurrency bug and must not be reported as a short batch.
pub fn reload_batch(path: &Path) -> Result<Vec<u64>, HarnessError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            let _ = fs::remove_file(path);
            return Err(HarnessError::io("reload", e));
        }
    };
    fs::remove_file(path).map_err(|e| HarnessError::io("cleanup", e))?;

    let mut batch = Vec::with_capacity(contents.len() / 8);
    for (index, line) in contents.lines().enumerate() {
        let value = line
            .trim()
            .parse::<u64>()
            .map_err(|e| HarnessError::MalformedReload {
                path: path.to_path_buf(),
                detail: format!("line {}: {e}", index + 1),
            })?;
        batch.push(value);
    }
    Ok(batch)
}

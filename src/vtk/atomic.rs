//! Atomic file replacement for dataset writes.
//!
//! Every dataset write goes through a temporary file in the target directory
//! followed by a rename, so a crash mid-write never leaves a half-written
//! file visible at the final path and a failed write never corrupts sibling
//! files already on disk.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::util::{Error, Result};

/// Write a file atomically: emit into a temp file, then rename into place.
///
/// Any filesystem failure surfaces as [`Error::ExportIo`] carrying the final
/// path; the temp file is cleaned up on failure.
pub fn write_atomic(
    path: &Path,
    emit: impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::export_io(path, e))?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        emit(&mut out).map_err(|e| Error::export_io(path, e))?;
        out.flush().map_err(|e| Error::export_io(path, e))?;
    }
    tmp.persist(path)
        .map_err(|e| Error::export_io(path, e.error))?;
    Ok(())
}

//! File input and output helpers for snapshots and export documents.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

pub mod snapshot;
pub mod xml;

/// Reads a file to string.
pub fn read_to_string(path: &Path) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The data is written to a temporary file in the same directory first and
/// then moved over the destination, so readers never see a partial file.
pub fn write_string(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

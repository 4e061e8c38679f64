//! Atomic file placement
//!
//! Every staged file is written to a hidden sibling and renamed into place,
//! so a reader of the staging area never sees a partial file.

use std::fs::File;
use std::io;
use std::path::Path;

/// Prefix of in-flight temp files; the random part keeps them unique per write
pub(crate) const TEMP_PREFIX: &str = ".expediente-";

/// Run `write` against a fresh temp file next to `target`, then rename it into place
///
/// The temp file is created exclusively with a random name, so concurrent
/// writers in the same directory never share it, whatever the final names.
/// It is removed if `write` or the rename fails.
fn write_then_rename<T, F>(target: &Path, write: F) -> io::Result<T>
where
    F: FnOnce(&mut File) -> io::Result<T>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".part")
        .tempfile_in(dir)?;

    let value = write(temp.as_file_mut())?;
    temp.persist(target).map_err(|e| e.error)?;
    Ok(value)
}

/// Copy `source` to `target`, returning the number of bytes copied
pub fn atomic_copy(source: &Path, target: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    write_then_rename(target, |temp| io::copy(&mut reader, temp))
}

/// Write a zero-length file at `target`
pub fn write_placeholder(target: &Path) -> io::Result<()> {
    write_then_rename(target, |_| Ok(()))
}

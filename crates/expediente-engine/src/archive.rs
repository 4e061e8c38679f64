//! Archiver
//!
//! Packs a staged directory into a single `.zip` or `.tar.gz`. Entries are
//! named relative to the archived directory, with `/` separators.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use expediente_core::errors::{ExError, ExpedienteError};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::settings::ArchiveFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub format: ArchiveFormat,
    pub bytes: u64,
}

/// Write `source_dir` as an archive of `format` at `output`
///
/// Parent directories of `output` are created and an existing file is
/// overwritten. `source_dir` is only read, so it is left intact whatever
/// the outcome.
///
/// # Errors
/// `Archive` when `source_dir` is not a directory, when `output` lies inside
/// it, or on any write failure. A partially written output is removed.
pub fn create_archive(
    source_dir: &Path,
    output: &Path,
    format: ArchiveFormat,
) -> Result<ArchiveSummary, ExError> {
    let fail = |reason: String| -> ExError {
        ExError::from(ExpedienteError::Archive {
            path: output.display().to_string(),
            reason,
        })
        .with_op("create_archive")
    };

    if !source_dir.is_dir() {
        return Err(fail(format!(
            "{} is not a directory",
            source_dir.display()
        )));
    }

    let source_abs = absolute(source_dir).map_err(|e| fail(e.to_string()))?;
    let output_abs = absolute(output).map_err(|e| fail(e.to_string()))?;
    if output_abs.starts_with(&source_abs) {
        return Err(fail(format!(
            "output lies inside the archived directory {}",
            source_dir.display()
        )));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
    }

    let written = match format {
        ArchiveFormat::Zip => write_zip(source_dir, output),
        ArchiveFormat::TarGz => write_tar_gz(source_dir, output),
    };

    match written {
        Ok(bytes) => {
            tracing::debug!(
                component = module_path!(),
                path = %output.display(),
                format = %format,
                bytes,
                "archive written"
            );
            Ok(ArchiveSummary {
                path: output.to_path_buf(),
                format,
                bytes,
            })
        }
        Err(e) => {
            let _ = fs::remove_file(output);
            Err(fail(e.to_string()))
        }
    }
}

fn write_zip(source_dir: &Path, output: &Path) -> io::Result<u64> {
    let mut zip = ZipWriter::new(BufWriter::new(File::create(output)?));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    // Explicit stack of directories relative to `source_dir`; children sorted by name
    let mut pending = vec![PathBuf::new()];
    while let Some(relative) = pending.pop() {
        let mut children = fs::read_dir(source_dir.join(&relative))?.collect::<io::Result<Vec<_>>>()?;
        children.sort_by_key(|entry| entry.file_name());

        let mut subdirs = Vec::new();
        for child in children {
            let child_relative = relative.join(child.file_name());
            let name = entry_name(&child_relative);
            let file_type = child.file_type()?;
            if file_type.is_dir() {
                zip.add_directory(name, options).map_err(io::Error::other)?;
                subdirs.push(child_relative);
            } else if file_type.is_file() {
                zip.start_file(name, options).map_err(io::Error::other)?;
                io::copy(&mut File::open(child.path())?, &mut zip)?;
            }
        }
        pending.extend(subdirs.into_iter().rev());
    }

    let mut file = zip.finish().map_err(io::Error::other)?;
    file.flush()?;
    drop(file);

    Ok(fs::metadata(output)?.len())
}

fn write_tar_gz(source_dir: &Path, output: &Path) -> io::Result<u64> {
    let file = BufWriter::new(File::create(output)?);
    let mut tar = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    // An empty archive path keeps the source directory itself out of the entry names
    tar.append_dir_all("", source_dir)?;

    let encoder = tar.into_inner()?;
    let mut file = encoder.finish()?;
    file.flush()?;
    drop(file);

    Ok(fs::metadata(output)?.len())
}

/// Archive entry name for a path relative to the archived directory
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Absolute, lexically normalized form of `path`
fn absolute(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use expediente_core::errors::{ExError, ExErrorKind, ExpedienteError};
use expediente_core::issues::{ExportIssue, IssueLog};
use expediente_core::model::{relative_to, StagingEntry, PATH_SEPARATOR};
use expediente_core::tree::ResolvedTree;
use rayon::prelude::*;
use serde::Serialize;

use super::atomic::{atomic_copy, write_placeholder};
use crate::settings::{ExportSettings, MissingSourcePolicy};

/// What the staging executor did
#[derive(Debug, Clone, Default, Serialize)]
pub struct StagingReport {
    pub run_dir: PathBuf,
    pub directories: usize,
    pub files_copied: usize,
    pub bytes_copied: u64,
    pub placeholders: usize,
    /// Directories or files that could not be written at all
    pub failures: usize,
    #[serde(skip)]
    pub issues: IssueLog,
}

/// Result of placing one entry, produced on a pool thread
enum Placement {
    Copied(u64),
    Placeholder(ExportIssue),
    MissingAborted(ExportIssue),
    Failed(ExportIssue),
}

/// Stage `resolved` folders and `entries` below `run_dir`
///
/// Directory creation is idempotent, so staging the same plan twice yields
/// the same tree. Per-path failures are recorded and never stop sibling
/// work; only an unusable run directory, a pool that cannot start, or a
/// missing source under `MissingSourcePolicy::Abort` fails the call.
///
/// # Errors
/// * `StagingIo` - the run directory cannot be created
/// * `MissingSourceFile` - a source is absent and the policy is `Abort`
/// * `Internal` - the copy pool cannot be built
pub fn stage(
    resolved: &ResolvedTree,
    entries: &[StagingEntry],
    run_dir: &Path,
    settings: &ExportSettings,
) -> Result<StagingReport, ExError> {
    fs::create_dir_all(run_dir).map_err(|e| {
        ExError::from(ExpedienteError::StagingIo {
            path: run_dir.display().to_string(),
            reason: e.to_string(),
        })
        .with_op("create_run_dir")
    })?;

    let mut report = StagingReport {
        run_dir: run_dir.to_path_buf(),
        ..StagingReport::default()
    };

    let failed_dirs = create_directories(resolved, run_dir, &mut report);

    let mut pending = Vec::with_capacity(entries.len());
    for entry in entries {
        if failed_dirs.iter().any(|dir| is_within(&entry.destination_dir, dir)) {
            report.failures += 1;
            report.issues.record(ExportIssue::StagingFailure {
                path: entry.destination_path(),
                document_id: Some(entry.document_id),
                reason: "destination directory could not be created".to_string(),
            });
        } else {
            pending.push(entry);
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.workers.max(1))
        .thread_name(|i| format!("expediente-stage-{}", i))
        .build()
        .map_err(|e| {
            ExError::new(ExErrorKind::Internal)
                .with_op("build_copy_pool")
                .with_message(e.to_string())
        })?;

    // Collect preserves entry order, so issues are recorded deterministically
    let placements: Vec<Placement> = pool.install(|| {
        pending
            .par_iter()
            .map(|entry| place_entry(entry, run_dir, settings))
            .collect()
    });

    let mut first_missing = None;
    for placement in placements {
        match placement {
            Placement::Copied(bytes) => {
                report.files_copied += 1;
                report.bytes_copied += bytes;
            }
            Placement::Placeholder(issue) => {
                report.placeholders += 1;
                report.issues.record(issue);
            }
            Placement::MissingAborted(issue) => {
                if first_missing.is_none() {
                    first_missing = Some(issue.clone());
                }
                report.issues.record(issue);
            }
            Placement::Failed(issue) => {
                report.failures += 1;
                report.issues.record(issue);
            }
        }
    }

    if let Some(ExportIssue::MissingSource {
        document_id,
        source,
        ..
    }) = first_missing
    {
        return Err(ExError::from(ExpedienteError::MissingSourceFile {
            document_id,
            source_path: source,
        })
        .with_op("stage"));
    }

    tracing::debug!(
        component = module_path!(),
        run_dir = %run_dir.display(),
        directories = report.directories,
        files_copied = report.files_copied,
        placeholders = report.placeholders,
        failures = report.failures,
        "staging finished"
    );

    Ok(report)
}

/// Create every resolved folder below `run_dir`, parents first
///
/// Returns the resolved paths that could not be created.
fn create_directories(
    resolved: &ResolvedTree,
    run_dir: &Path,
    report: &mut StagingReport,
) -> Vec<String> {
    let mut failed: Vec<String> = Vec::new();

    for folder in resolved.folders() {
        if failed.iter().any(|dir| is_within(&folder.path, dir)) {
            continue;
        }

        let dir = relative_to(run_dir, &folder.path);
        match fs::create_dir_all(&dir) {
            Ok(()) => report.directories += 1,
            Err(e) => {
                report.failures += 1;
                report.issues.record(ExportIssue::StagingFailure {
                    path: dir.display().to_string(),
                    document_id: None,
                    reason: e.to_string(),
                });
                failed.push(folder.path.clone());
            }
        }
    }

    failed
}

/// Whether resolved `path` is `dir` or lies below it
fn is_within(path: &str, dir: &str) -> bool {
    if dir.is_empty() {
        return true;
    }
    path == dir
        || path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR))
}

fn place_entry(entry: &StagingEntry, run_dir: &Path, settings: &ExportSettings) -> Placement {
    let destination = entry.destination_in(run_dir);
    let destination_label = entry.destination_path();

    let Some(source) = entry.source_in(&settings.source_base) else {
        return placeholder_or_fail(
            &destination,
            ExportIssue::CopyFailed {
                document_id: entry.document_id,
                source: entry.stored_name.clone(),
                destination: destination_label,
                reason: "stored name escapes the source base directory".to_string(),
            },
        );
    };

    if !source.is_file() {
        let issue = ExportIssue::MissingSource {
            document_id: entry.document_id,
            source: source.display().to_string(),
            destination: destination_label,
        };
        return match settings.missing_source {
            MissingSourcePolicy::Abort => Placement::MissingAborted(issue),
            MissingSourcePolicy::Placeholder => placeholder_or_fail(&destination, issue),
        };
    }

    match atomic_copy(&source, &destination) {
        Ok(bytes) => Placement::Copied(bytes),
        Err(e) => placeholder_or_fail(
            &destination,
            ExportIssue::CopyFailed {
                document_id: entry.document_id,
                source: source.display().to_string(),
                destination: destination_label,
                reason: e.to_string(),
            },
        ),
    }
}

/// Stage a placeholder for `issue`, or report a failure if even that cannot be written
fn placeholder_or_fail(destination: &Path, issue: ExportIssue) -> Placement {
    match write_placeholder(destination) {
        Ok(()) => Placement::Placeholder(issue),
        Err(e) => Placement::Failed(staging_failure(destination, &issue, e)),
    }
}

fn staging_failure(destination: &Path, issue: &ExportIssue, err: io::Error) -> ExportIssue {
    let document_id = match issue {
        ExportIssue::MissingSource { document_id, .. }
        | ExportIssue::CopyFailed { document_id, .. } => Some(*document_id),
        _ => None,
    };
    ExportIssue::StagingFailure {
        path: destination.display().to_string(),
        document_id,
        reason: err.to_string(),
    }
}

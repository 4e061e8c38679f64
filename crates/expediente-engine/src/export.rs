//! Export pipeline
//!
//! gateway → tree builder → path resolver → document binder → staging →
//! archive. Everything up to binding happens in memory; the first
//! filesystem write is the run directory, so fatal resolution errors
//! (cycles, missing root) leave nothing on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use expediente_core::errors::{ExError, ExErrorKind};
use expediente_core::gateway::FolderGateway;
use expediente_core::issues::{ExportIssue, IssueLog, Severity};
use expediente_core::model::{FolderId, ResolvedFolder, StagingEntry};
use expediente_core::policy::ResolveOptions;
use expediente_core::tree::ResolvedTree;
use expediente_core::{bind_documents, build_tree, resolve_paths};
use expediente_core::{log_op_end, log_op_error, log_op_start};
use expediente_core_types::RunId;
use serde::Serialize;

use crate::archive::create_archive;
use crate::settings::{ArchiveFormat, ExportSettings};
use crate::staging::stage;

/// Resolved layout and staging entries for one root, computed without writes
#[derive(Debug, Clone, Serialize)]
pub struct ExportPlan {
    pub root_id: FolderId,
    pub folders: Vec<ResolvedFolder>,
    pub entries: Vec<StagingEntry>,
    /// Deleted or trashed documents filtered out during binding
    pub filtered_documents: usize,
    pub issues: Vec<ExportIssue>,
}

/// Outcome of a successful export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub run_id: String,
    pub root_id: FolderId,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub duration_ms: u64,
    pub archive_path: PathBuf,
    pub archive_format: ArchiveFormat,
    pub archive_bytes: u64,
    /// Run directory, or None once cleaned up
    pub staging_dir: Option<PathBuf>,
    pub folders: usize,
    pub documents: usize,
    pub filtered_documents: usize,
    pub files_copied: usize,
    pub placeholders: usize,
    pub failures: usize,
    pub issues: Vec<ExportIssue>,
}

impl ExportReport {
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Warning)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count()
    }

    /// Issue counts keyed by stable error code
    pub fn issue_summary(&self) -> BTreeMap<&'static str, usize> {
        let mut summary = BTreeMap::new();
        for issue in &self.issues {
            *summary.entry(issue.code()).or_insert(0) += 1;
        }
        summary
    }
}

struct Planned {
    resolved: ResolvedTree,
    entries: Vec<StagingEntry>,
    filtered: usize,
    issues: IssueLog,
}

fn build_plan<G>(gateway: &G, root_id: FolderId, options: &ResolveOptions) -> Result<Planned, ExError>
where
    G: FolderGateway + ?Sized,
{
    let rows = gateway
        .load_folders(root_id)
        .map_err(|e| e.with_op("load_folders"))?;

    let tree = build_tree(rows);
    let resolved = resolve_paths(&tree, root_id, options)
        .map_err(|e| ExError::from(e).with_op("resolve_paths"))?;

    let documents = gateway
        .load_documents(&resolved.ids())
        .map_err(|e| e.with_op("load_documents"))?;
    let bound = bind_documents(&tree, &resolved, documents, options.collision);

    let mut issues = tree.issues().clone();
    issues.extend(resolved.issues().clone());
    issues.extend(bound.issues);

    Ok(Planned {
        resolved,
        entries: bound.entries,
        filtered: bound.filtered,
        issues,
    })
}

/// Resolve and bind without touching the filesystem
///
/// # Errors
/// Gateway failures, `NotFound` for a missing or deleted root, and
/// `CycleDetected`.
pub fn plan_export<G>(gateway: &G, root_id: FolderId, options: &ResolveOptions) -> Result<ExportPlan, ExError>
where
    G: FolderGateway + ?Sized,
{
    log_op_start!("plan_export", root_id = root_id);
    let start = Instant::now();

    let planned = build_plan(gateway, root_id, options).map_err(|e| {
        log_op_error!(
            "plan_export",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            root_id = root_id
        );
        e
    })?;

    log_op_end!(
        "plan_export",
        duration_ms = start.elapsed().as_millis() as u64,
        folder_count = planned.resolved.len(),
        entry_count = planned.entries.len(),
        warning_count = planned.issues.len()
    );

    Ok(ExportPlan {
        root_id,
        folders: planned.resolved.folders().to_vec(),
        entries: planned.entries,
        filtered_documents: planned.filtered,
        issues: planned.issues.into_vec(),
    })
}

/// Export the subtree under `root_id` as an archive at `settings.output_path`
///
/// The run stages into `<staging_dir>/<run_id>`. On archive failure the run
/// directory is kept for inspection; on success it is kept unless
/// `cleanup_staging` is set.
///
/// # Errors
/// Everything `plan_export` returns, plus `Configuration` for invalid
/// settings, `StagingIo` for an unusable staging area, `MissingSourceFile`
/// under the abort policy, and `Archive`.
pub fn run_export<G>(gateway: &G, root_id: FolderId, settings: &ExportSettings) -> Result<ExportReport, ExError>
where
    G: FolderGateway + ?Sized,
{
    let run_id = RunId::new();
    log_op_start!("export", root_id = root_id, run_id = run_id.as_str());
    let start = Instant::now();

    let result = run_export_impl(gateway, root_id, settings, &run_id, start).map_err(|e| {
        let e = e.with_run_id(run_id.clone());
        log_op_error!(
            "export",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = run_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "export",
        duration_ms = result.duration_ms,
        run_id = run_id.as_str(),
        folder_count = result.folders,
        entry_count = result.documents,
        warning_count = result.warning_count()
    );

    Ok(result)
}

fn run_export_impl<G>(
    gateway: &G,
    root_id: FolderId,
    settings: &ExportSettings,
    run_id: &RunId,
    start: Instant,
) -> Result<ExportReport, ExError>
where
    G: FolderGateway + ?Sized,
{
    let started_at = chrono::Utc::now();
    settings.validate()?;

    let planned = build_plan(gateway, root_id, &settings.resolve_options())?;

    let run_dir = settings.staging_dir.join(run_id.as_str());
    let staged = stage(&planned.resolved, &planned.entries, &run_dir, settings)?;

    let archive_root = match &settings.archive_subdir {
        Some(subdir) => run_dir.join(subdir),
        None => run_dir.clone(),
    };
    let archive = create_archive(&archive_root, &settings.output_path, settings.archive_format)?;

    let staging_dir = if settings.cleanup_staging {
        remove_run_dir(&run_dir)
    } else {
        Some(run_dir)
    };

    let mut issues = planned.issues;
    issues.extend(staged.issues);

    Ok(ExportReport {
        run_id: run_id.to_string(),
        root_id,
        started_at,
        duration_ms: start.elapsed().as_millis() as u64,
        archive_path: archive.path,
        archive_format: archive.format,
        archive_bytes: archive.bytes,
        staging_dir,
        folders: planned.resolved.len(),
        documents: planned.entries.len(),
        filtered_documents: planned.filtered,
        files_copied: staged.files_copied,
        placeholders: staged.placeholders,
        failures: staged.failures,
        issues: issues.into_vec(),
    })
}

/// Remove the run directory, returning it back if removal failed
fn remove_run_dir(run_dir: &Path) -> Option<PathBuf> {
    match fs::remove_dir_all(run_dir) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(
                component = module_path!(),
                err.code = ExErrorKind::StagingIo.code(),
                path = %run_dir.display(),
                error = %e,
                "run directory could not be removed"
            );
            Some(run_dir.to_path_buf())
        }
    }
}

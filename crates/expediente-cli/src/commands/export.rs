//! Export command
//!
//! Usage: expediente export --root <ID> [--output <PATH>] [--archive-format zip|tar_gz] [--json]

use std::path::PathBuf;

use clap::Args;
use expediente_engine::gateway::open_sqlite_gateway;
use expediente_engine::{run_export, ArchiveFormat, ExportReport, MissingSourcePolicy};
use expediente_store::RetryPolicy;

use super::TreeArgs;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub tree: TreeArgs,

    /// Archive to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Archive container: zip or tar_gz
    #[arg(long)]
    pub archive_format: Option<ArchiveFormat>,

    /// Directory holding document content files
    #[arg(long)]
    pub source_base: Option<PathBuf>,

    /// Base directory for per-run staging
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,

    /// Absent content files: placeholder or abort
    #[arg(long)]
    pub missing_source: Option<MissingSourcePolicy>,

    /// Copy pool size
    #[arg(long)]
    pub workers: Option<usize>,

    /// Archive only this subdirectory of the staged tree
    #[arg(long)]
    pub archive_subdir: Option<String>,

    /// Remove the staging directory after a successful archive
    #[arg(long)]
    pub cleanup_staging: bool,
}

/// Execute export command
pub fn execute(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = args.tree.load_settings()?;
    let export = &mut settings.export;
    if let Some(output) = args.output {
        export.output_path = output;
    }
    if let Some(format) = args.archive_format {
        export.archive_format = format;
    }
    if let Some(source_base) = args.source_base {
        export.source_base = source_base;
    }
    if let Some(staging_dir) = args.staging_dir {
        export.staging_dir = staging_dir;
    }
    if let Some(policy) = args.missing_source {
        export.missing_source = policy;
    }
    if let Some(workers) = args.workers {
        export.workers = workers;
    }
    if args.archive_subdir.is_some() {
        export.archive_subdir = args.archive_subdir;
    }
    if args.cleanup_staging {
        export.cleanup_staging = true;
    }

    let gateway = open_sqlite_gateway(&settings.db, RetryPolicy::default())?;
    let report = run_export(&gateway, args.tree.root, &settings.export)?;

    if args.tree.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &ExportReport) {
    println!(
        "✓ Exported root {} to {} ({}, {} bytes)",
        report.root_id,
        report.archive_path.display(),
        report.archive_format,
        report.archive_bytes
    );
    println!(
        "  {} folders, {} documents ({} copied, {} placeholders, {} failed)",
        report.folders, report.documents, report.files_copied, report.placeholders, report.failures
    );
    if let Some(dir) = &report.staging_dir {
        println!("  staging kept at {}", dir.display());
    }

    let summary = report.issue_summary();
    if !summary.is_empty() {
        println!(
            "  {} warnings, {} errors",
            report.warning_count(),
            report.error_count()
        );
        for (code, count) in summary {
            println!("    {}: {}", code, count);
        }
    }
}

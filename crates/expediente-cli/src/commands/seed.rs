//! Seed import command
//!
//! Usage: expediente seed import <PATH> [--db <PATH>]

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::settings;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file into the database
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,

    /// SQLite database to write; created and migrated when absent
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute seed command
pub fn execute(args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args),
    }
}

/// Execute seed import
fn execute_import(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = match args.db {
        Some(db) => db,
        None => settings::load(args.config.as_deref())?.db,
    };
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut conn = expediente_store::db::open_migrated(&db_path)?;

    let seed_files = if args.path.is_dir() {
        // Sorted for determinism
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    for seed_file in seed_files {
        println!("Importing {}...", seed_file.display());
        let summary = expediente_store::seed::import_seed(&seed_file, &mut conn)?;
        println!(
            "✓ Imported {} folders, {} documents",
            summary.folders, summary.documents
        );
    }

    Ok(())
}

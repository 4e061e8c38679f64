//! Expediente CLI
//!
//! Command-line interface for exporting folder trees as archives

use clap::{Parser, Subcommand};
use expediente_core::logging_facility::{self, Profile};

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "expediente")]
#[command(about = "Expediente - export a folder tree and its documents as a zip archive", long_about = None)]
struct Cli {
    /// Log output: development (human readable) or production (JSON)
    #[arg(long, global = true, default_value = "development")]
    log: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export the subtree under a root folder as an archive
    Export(commands::export::ExportArgs),
    /// Show the resolved layout for a root folder without writing files
    Plan(commands::plan::PlanArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
}

fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging_facility::init(cli.log);

    let result = match cli.command {
        Commands::Export(args) => commands::export::execute(args),
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Seed(args) => commands::seed::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

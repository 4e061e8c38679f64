//! Plan command
//!
//! Usage: expediente plan --root <ID> [--db <PATH>] [--json]
//!
//! Prints the resolved folder layout and document destinations without
//! writing anything.

use clap::Args;
use expediente_engine::gateway::open_sqlite_gateway;
use expediente_engine::plan_export;
use expediente_store::RetryPolicy;

use super::TreeArgs;

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub tree: TreeArgs,
}

/// Execute plan command
pub fn execute(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = args.tree.load_settings()?;
    let gateway = open_sqlite_gateway(&settings.db, RetryPolicy::default())?;
    let plan = plan_export(&gateway, args.tree.root, &settings.export.resolve_options())?;

    if args.tree.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for folder in &plan.folders {
        if folder.path.is_empty() {
            println!("./");
        } else {
            println!("{}/", folder.path);
        }
    }
    for entry in &plan.entries {
        println!("{}  <- {}", entry.destination_path(), entry.stored_name);
    }
    println!(
        "{} folders, {} documents, {} filtered, {} warnings",
        plan.folders.len(),
        plan.entries.len(),
        plan.filtered_documents,
        plan.issues.len()
    );

    Ok(())
}

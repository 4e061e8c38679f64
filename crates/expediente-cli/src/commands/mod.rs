pub mod export;
pub mod plan;
pub mod seed;

use std::path::PathBuf;

use clap::Args;
use expediente_core::policy::{CollisionPolicy, RootMode};

use crate::settings::{self, CliSettings};

/// Flags shared by commands that read the folder tree
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Id of the folder whose subtree is exported
    #[arg(long)]
    pub root: i64,

    /// Settings file (TOML); defaults to ./expediente.toml when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQLite database holding folders and documents
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Whether the root folder's name leads every path: inclusive or relative
    #[arg(long)]
    pub root_mode: Option<RootMode>,

    /// Sibling name collisions: disambiguate or skip
    #[arg(long)]
    pub collision: Option<CollisionPolicy>,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl TreeArgs {
    /// Layered settings with these flags applied on top
    pub fn load_settings(&self) -> Result<CliSettings, Box<dyn std::error::Error>> {
        let mut settings = settings::load(self.config.as_deref())?;
        if let Some(db) = &self.db {
            settings.db = db.clone();
        }
        if let Some(mode) = self.root_mode {
            settings.export.root_mode = mode;
        }
        if let Some(collision) = self.collision {
            settings.export.collision = collision;
        }
        Ok(settings)
    }
}

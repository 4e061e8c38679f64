//! Settings layering
//!
//! Built-in defaults, then a TOML file (`--config`, or `expediente.toml` in
//! the working directory when present), then `EXPEDIENTE_*` environment
//! variables. Command-line flags are applied last by each command.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use expediente_engine::ExportSettings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "expediente.toml";
pub const ENV_PREFIX: &str = "EXPEDIENTE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// SQLite database holding the folder and document tables
    pub db: PathBuf,

    #[serde(flatten)]
    pub export: ExportSettings,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            db: PathBuf::from("expediente.db"),
            export: ExportSettings::default(),
        }
    }
}

/// Load layered settings
///
/// An explicit `config_path` must exist; the default file is optional.
pub fn load(config_path: Option<&Path>) -> Result<CliSettings, config::ConfigError> {
    let file = match config_path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
    };

    Config::builder()
        .add_source(Config::try_from(&CliSettings::default())?)
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?
        .try_deserialize()
}

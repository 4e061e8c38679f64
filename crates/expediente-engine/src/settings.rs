//! Export run settings
//!
//! Plain serde data so the CLI can layer defaults, a TOML file, environment
//! variables and flags into one value before a run.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use expediente_core::errors::{ExError, ExErrorKind};
use expediente_core::policy::{CollisionPolicy, ResolveOptions, RootMode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKERS: usize = 4;

/// What to stage when a document's content file is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSourcePolicy {
    /// Write a zero-length file under the document's name and warn
    #[default]
    Placeholder,
    /// Fail the run once the copy phase finishes
    Abort,
}

impl fmt::Display for MissingSourcePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingSourcePolicy::Placeholder => write!(f, "placeholder"),
            MissingSourcePolicy::Abort => write!(f, "abort"),
        }
    }
}

impl FromStr for MissingSourcePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(MissingSourcePolicy::Placeholder),
            "abort" => Ok(MissingSourcePolicy::Abort),
            other => Err(format!(
                "unknown missing-source policy '{}': expected 'placeholder' or 'abort'",
                other
            )),
        }
    }
}

/// Container written by the archiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveFormat {
    /// Deflate-compressed `.zip`, the format recipients of an expediente expect
    #[default]
    Zip,
    /// gzip-compressed tar
    TarGz,
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Zip => write!(f, "zip"),
            ArchiveFormat::TarGz => write!(f, "tar_gz"),
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar_gz" | "tar.gz" | "tgz" => Ok(ArchiveFormat::TarGz),
            other => Err(format!(
                "unknown archive format '{}': expected 'zip' or 'tar_gz'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory holding document content files, addressed by stored name
    pub source_base: PathBuf,

    /// Base directory for staging; each run writes below `<staging_dir>/<run_id>`
    pub staging_dir: PathBuf,

    /// Archive file to produce
    pub output_path: PathBuf,

    pub archive_format: ArchiveFormat,

    pub root_mode: RootMode,
    pub collision: CollisionPolicy,
    pub missing_source: MissingSourcePolicy,

    /// Size of the copy pool
    pub workers: usize,

    /// Archive only this subdirectory of the run directory
    pub archive_subdir: Option<String>,

    /// Remove the run directory after a successful archive
    pub cleanup_staging: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            source_base: PathBuf::from("."),
            staging_dir: std::env::temp_dir().join("expediente-staging"),
            output_path: PathBuf::from("expediente.zip"),
            archive_format: ArchiveFormat::default(),
            root_mode: RootMode::default(),
            collision: CollisionPolicy::default(),
            missing_source: MissingSourcePolicy::default(),
            workers: DEFAULT_WORKERS,
            archive_subdir: None,
            cleanup_staging: false,
        }
    }
}

impl ExportSettings {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            root_mode: self.root_mode,
            collision: self.collision,
        }
    }

    /// Reject settings that cannot produce a run
    ///
    /// # Errors
    /// `Configuration` when `workers` is zero or `archive_subdir` is not a
    /// plain relative path.
    pub fn validate(&self) -> Result<(), ExError> {
        if self.workers == 0 {
            return Err(config_error("workers must be at least 1"));
        }

        if let Some(subdir) = &self.archive_subdir {
            let plain = !subdir.trim().is_empty()
                && Path::new(subdir)
                    .components()
                    .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
            if !plain {
                return Err(config_error(&format!(
                    "archive_subdir '{}' must be a relative path inside the run directory",
                    subdir
                )));
            }
        }

        Ok(())
    }
}

fn config_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::Configuration)
        .with_op("validate_settings")
        .with_message(reason.to_string())
}

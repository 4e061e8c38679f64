//! Seed import system
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML parser with validation
//! - Transactional importer

pub mod format_v0;
pub mod importer;
pub mod parser;

pub use format_v0::{SeedDocument, SeedFolder, SeedV0};
pub use importer::{import_seed, import_seed_v0, ImportSummary};
pub use parser::{parse_seed_file, parse_seed_str};

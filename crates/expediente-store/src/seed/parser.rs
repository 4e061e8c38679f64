//! Seed parser with validation
//!
//! Parses YAML and validates schema version and id uniqueness. Dangling
//! references (documents in unknown folders, missing parents) are allowed:
//! fixtures use them to exercise the exporter's integrity reporting.

use crate::errors::{io_error, seed_syntax, seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| io_error("seed_read", e).with_path(path.display().to_string()))?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content).map_err(seed_syntax)?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut folder_ids = HashSet::new();
    for folder in &seed.folders {
        if !folder_ids.insert(folder.id) {
            return Err(seed_validation(&format!("Duplicate folder id {}", folder.id)));
        }
    }

    let mut document_ids = HashSet::new();
    for document in &seed.documents {
        if !document_ids.insert(document.id) {
            return Err(seed_validation(&format!(
                "Duplicate document id {}",
                document.id
            )));
        }
        if document.stored_name.trim().is_empty() {
            return Err(seed_validation(&format!(
                "Document {} has an empty stored_name",
                document.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_schema_version() {
        let err = parse_seed_str("schema_version: 1\n").unwrap_err();
        assert!(err.message().contains("schema_version"));
    }

    #[test]
    fn test_rejects_duplicate_folder_ids() {
        let yaml = r#"
schema_version: 0
folders:
  - { id: 1, name: A }
  - { id: 1, parent: 3, name: B }
"#;
        let err = parse_seed_str(yaml).unwrap_err();
        assert!(err.message().contains("Duplicate folder id 1"));
    }

    #[test]
    fn test_allows_dangling_folder_reference() {
        let yaml = r#"
schema_version: 0
folders:
  - { id: 1, name: A }
documents:
  - { id: 10, folder: 99, stored_name: orphan }
"#;
        let seed = parse_seed_str(yaml).unwrap();
        assert_eq!(seed.documents[0].folder, 99);
    }

    #[test]
    fn test_rejects_empty_stored_name() {
        let yaml = r#"
schema_version: 0
documents:
  - { id: 10, folder: 1, stored_name: "" }
"#;
        assert!(parse_seed_str(yaml).is_err());
    }
}

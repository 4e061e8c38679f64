//! Seed Format v0 schema
//!
//! YAML fixture describing folder and document rows exactly as the
//! exporter reads them from the database.

use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub folders: Vec<SeedFolder>,

    #[serde(default)]
    pub documents: Vec<SeedDocument>,
}

/// Folder row in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFolder {
    pub id: i64,

    /// Parent folder id; omitted or null for roots
    #[serde(default)]
    pub parent: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub deleted: bool,
}

/// Document row in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDocument {
    pub id: i64,

    #[serde(default)]
    pub agent: String,

    /// Owning folder id (not required to exist)
    pub folder: i64,

    /// Content file name under the source base directory
    pub stored_name: String,

    #[serde(default)]
    pub real_name: Option<String>,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default)]
    pub trashed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_seed() {
        let yaml = r#"
schema_version: 0
folders:
  - id: 1
    name: A
  - id: 2
    parent: 1
    name: B
documents:
  - id: 10
    folder: 2
    stored_name: doc1
    real_name: report.pdf
"#;

        let seed: SeedV0 = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(seed.schema_version, 0);
        assert_eq!(seed.folders.len(), 2);
        assert_eq!(seed.folders[0].parent, None);
        assert_eq!(seed.folders[1].parent, Some(1));
        assert!(!seed.folders[1].deleted);
        assert_eq!(seed.documents[0].real_name.as_deref(), Some("report.pdf"));
        assert!(seed.documents[0].agent.is_empty());
    }

    #[test]
    fn test_sections_default_to_empty() {
        let seed: SeedV0 = serde_yaml::from_str("schema_version: 0\n").unwrap();
        assert!(seed.folders.is_empty());
        assert!(seed.documents.is_empty());
    }
}

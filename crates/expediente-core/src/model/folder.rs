use serde::{Deserialize, Serialize};

/// Folder identifier as stored in the folder table
pub type FolderId = i64;

/// Folder - one node of the parent-pointer hierarchy
///
/// Rows arrive from the folder store gateway already coerced into this shape.
/// A folder whose `parent_id` is `None` or equal to its own id is a root marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder id
    pub id: FolderId,

    /// Parent folder id (None, or the folder's own id, for roots)
    pub parent_id: Option<FolderId>,

    /// Display name, used as the directory name when materialized
    pub name: String,

    /// Tombstone flag - deleted folders and their descendants are never materialized
    pub deleted: bool,
}

impl Folder {
    /// Create a live folder
    pub fn new(id: FolderId, parent_id: Option<FolderId>, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            deleted: false,
        }
    }

    /// Parent link with self-references normalised away
    pub fn effective_parent(&self) -> Option<FolderId> {
        self.parent_id.filter(|parent| *parent != self.id)
    }

    /// Check if this folder is deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

/// A folder with its hierarchical path relative to the export root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFolder {
    pub id: FolderId,

    /// Path segment used for this folder (sanitized, possibly disambiguated)
    pub name: String,

    /// `/`-joined path from the export root; empty for a root-relative root
    pub path: String,

    /// Distance from the export root (root is 0)
    pub depth: usize,
}

impl ResolvedFolder {
    /// Number of path segments in `path`
    pub fn segment_count(&self) -> usize {
        if self.path.is_empty() {
            0
        } else {
            self.path.split(super::PATH_SEPARATOR).count()
        }
    }
}

use serde::{Deserialize, Serialize};

use super::FolderId;

/// Document identifier as stored in the document table
pub type DocumentId = i64;

/// Document - a stored file attached to exactly one folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,

    /// Agent (owner) that uploaded the document
    pub agent: String,

    /// Owning folder
    pub folder_id: FolderId,

    /// Name of the content file under the source base directory
    pub stored_name: String,

    /// User-facing file name, used as the staged file name
    pub real_name: String,

    pub deleted: bool,

    /// Moved to the trash by the user; excluded like deleted documents
    pub trashed: bool,
}

impl Document {
    /// Create a live document
    pub fn new(
        id: DocumentId,
        folder_id: FolderId,
        stored_name: impl Into<String>,
        real_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            agent: String::new(),
            folder_id,
            stored_name: stored_name.into(),
            real_name: real_name.into(),
            deleted: false,
            trashed: false,
        }
    }

    /// Whether the document takes part in an export
    pub fn is_live(&self) -> bool {
        !self.deleted && !self.trashed
    }

    /// File name to stage under, falling back to the stored name when no real name was recorded
    pub fn display_name(&self) -> &str {
        if self.real_name.trim().is_empty() {
            &self.stored_name
        } else {
            &self.real_name
        }
    }
}

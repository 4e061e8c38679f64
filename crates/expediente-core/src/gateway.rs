//! Folder store gateway
//!
//! The export core consumes folder and document rows through this trait and
//! never talks to a database directly. Implementations own connection
//! handling, query dialect and retry policy.

use std::collections::{HashSet, VecDeque};

use crate::errors::ExError;
use crate::model::{Document, Folder, FolderId};

/// Result type for gateway calls
pub type GatewayResult<T> = std::result::Result<T, ExError>;

/// Source of folder and document rows
pub trait FolderGateway {
    /// All live folder rows reachable from `root_id` by child links, root included
    fn load_folders(&self, root_id: FolderId) -> GatewayResult<Vec<Folder>>;

    /// All live, non-trashed documents whose folder is in `folder_ids`
    fn load_documents(&self, folder_ids: &[FolderId]) -> GatewayResult<Vec<Document>>;
}

impl<G: FolderGateway + ?Sized> FolderGateway for &G {
    fn load_folders(&self, root_id: FolderId) -> GatewayResult<Vec<Folder>> {
        (**self).load_folders(root_id)
    }

    fn load_documents(&self, folder_ids: &[FolderId]) -> GatewayResult<Vec<Document>> {
        (**self).load_documents(folder_ids)
    }
}

/// In-memory gateway over fixed row sets
///
/// Applies the same filtering contract as a database-backed gateway, which
/// makes it usable for dry runs over exported fixtures and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    folders: Vec<Folder>,
    documents: Vec<Document>,
}

impl MemoryGateway {
    pub fn new(folders: Vec<Folder>, documents: Vec<Document>) -> Self {
        Self { folders, documents }
    }

    pub fn insert_folder(&mut self, folder: Folder) {
        self.folders.push(folder);
    }

    pub fn insert_document(&mut self, document: Document) {
        self.documents.push(document);
    }
}

impl FolderGateway for MemoryGateway {
    fn load_folders(&self, root_id: FolderId) -> GatewayResult<Vec<Folder>> {
        let mut reached: HashSet<FolderId> = HashSet::new();
        let mut queue = VecDeque::new();

        if self.folders.iter().any(|f| f.id == root_id && !f.deleted) {
            reached.insert(root_id);
            queue.push_back(root_id);
        }

        // Visited set keeps cyclic rows from looping, like UNION in a recursive CTE
        while let Some(parent) = queue.pop_front() {
            for folder in &self.folders {
                if !folder.deleted
                    && folder.effective_parent() == Some(parent)
                    && reached.insert(folder.id)
                {
                    queue.push_back(folder.id);
                }
            }
        }

        Ok(self
            .folders
            .iter()
            .filter(|f| !f.deleted && reached.contains(&f.id))
            .cloned()
            .collect())
    }

    fn load_documents(&self, folder_ids: &[FolderId]) -> GatewayResult<Vec<Document>> {
        let wanted: HashSet<FolderId> = folder_ids.iter().copied().collect();
        Ok(self
            .documents
            .iter()
            .filter(|d| d.is_live() && wanted.contains(&d.folder_id))
            .cloned()
            .collect())
    }
}

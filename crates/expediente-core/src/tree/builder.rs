use std::collections::HashMap;

use crate::issues::{ExportIssue, IssueLog};
use crate::model::{Folder, FolderId};

/// In-memory adjacency structure over one export root's folder rows
///
/// Not thread-safe to mutate; built once per run and then only read.
#[derive(Debug, Clone, Default)]
pub struct FolderTree {
    /// Map of folder id to folder (every distinct input id, deleted ones included)
    folders: HashMap<FolderId, Folder>,
    /// Map of parent id to live child ids, in arrival order
    children: HashMap<FolderId, Vec<FolderId>>,
    /// Distinct ids in arrival order
    order: Vec<FolderId>,
    issues: IssueLog,
}

impl FolderTree {
    /// Get a folder by id (deleted folders included)
    pub fn get(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    /// Check whether an id appeared in the source rows
    pub fn contains(&self, id: FolderId) -> bool {
        self.folders.contains_key(&id)
    }

    /// Live direct children of `id`, in arrival order
    pub fn children_of(&self, id: FolderId) -> &[FolderId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct folder ids in arrival order
    pub fn ids(&self) -> &[FolderId] {
        &self.order
    }

    /// Iterate folders in arrival order
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.order.iter().filter_map(|id| self.folders.get(id))
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Integrity issues found while building
    pub fn issues(&self) -> &IssueLog {
        &self.issues
    }
}

/// Build the adjacency structure from unordered folder rows
///
/// - The first row for an id wins. A later row for the same id with a
///   different parent is reported as `ConflictingParent` and ignored; an
///   identical parent is coalesced silently.
/// - Self-parented rows are roots and never appear as their own child.
/// - Deleted rows are kept as known ids but never linked as children, so
///   they and everything below them stay unreachable.
pub fn build_tree<I>(rows: I) -> FolderTree
where
    I: IntoIterator<Item = Folder>,
{
    let mut tree = FolderTree::default();

    for folder in rows {
        if let Some(existing) = tree.folders.get(&folder.id) {
            if existing.effective_parent() != folder.effective_parent() {
                tree.issues.record(ExportIssue::ConflictingParent {
                    folder_id: folder.id,
                    kept_parent: existing.effective_parent(),
                    ignored_parent: folder.effective_parent(),
                });
            }
            continue;
        }

        if !folder.is_deleted() {
            if let Some(parent) = folder.effective_parent() {
                tree.children.entry(parent).or_default().push(folder.id);
            }
        }

        tree.order.push(folder.id);
        tree.folders.insert(folder.id, folder);
    }

    tracing::debug!(
        component = module_path!(),
        folder_count = tree.folders.len(),
        "folder tree built"
    );

    tree
}

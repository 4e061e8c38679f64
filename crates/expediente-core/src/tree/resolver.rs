use std::collections::{HashMap, HashSet};

use crate::errors::{ExpedienteError, Result};
use crate::issues::{ExportIssue, IssueLog};
use crate::model::{disambiguate_dir, join_path, sanitize_segment, FolderId, ResolvedFolder};
use crate::policy::{CollisionPolicy, ResolveOptions, RootMode};

use super::builder::FolderTree;

/// Folder paths resolved from one export root
#[derive(Debug, Clone, Default)]
pub struct ResolvedTree {
    root_id: FolderId,
    /// Resolved folders in traversal (pre-)order; parents precede children
    folders: Vec<ResolvedFolder>,
    /// Map of folder id to index in `folders`
    index: HashMap<FolderId, usize>,
    /// Segments occupied by materialized child directories, per parent
    child_segments: HashMap<FolderId, HashSet<String>>,
    issues: IssueLog,
}

impl ResolvedTree {
    pub fn root_id(&self) -> FolderId {
        self.root_id
    }

    /// Resolved folders, parents before children
    pub fn folders(&self) -> &[ResolvedFolder] {
        &self.folders
    }

    pub fn get(&self, id: FolderId) -> Option<&ResolvedFolder> {
        self.index.get(&id).map(|i| &self.folders[*i])
    }

    /// Resolved path of a folder, if it was materialized
    pub fn path_of(&self, id: FolderId) -> Option<&str> {
        self.get(id).map(|f| f.path.as_str())
    }

    /// Map of folder id to resolved path
    pub fn paths(&self) -> HashMap<FolderId, String> {
        self.folders
            .iter()
            .map(|f| (f.id, f.path.clone()))
            .collect()
    }

    /// Resolved folder ids in traversal order
    pub fn ids(&self) -> Vec<FolderId> {
        self.folders.iter().map(|f| f.id).collect()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Names taken by child directories of `id`
    ///
    /// A file placed in the folder must not reuse one of these.
    pub fn child_segments(&self, id: FolderId) -> impl Iterator<Item = &str> {
        self.child_segments
            .get(&id)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// Collisions and unreachable folders found while resolving
    pub fn issues(&self) -> &IssueLog {
        &self.issues
    }
}

enum Frame {
    Enter {
        id: FolderId,
        segment: String,
        parent_path: String,
        depth: usize,
    },
    Leave(FolderId),
}

/// Assign every folder reachable from `root_id` its path relative to the export root
///
/// Walks the tree depth-first with an explicit stack. A folder met again
/// while it is still on the current traversal path fails the whole
/// resolution with `CycleDetected`; nothing partial is returned.
///
/// # Errors
/// * `RootNotFound` - root id absent from the tree
/// * `RootDeleted` - root row is flagged deleted
/// * `CycleDetected` - a folder is reachable from itself
pub fn resolve_paths(
    tree: &FolderTree,
    root_id: FolderId,
    options: &ResolveOptions,
) -> Result<ResolvedTree> {
    let root = tree
        .get(root_id)
        .ok_or(ExpedienteError::RootNotFound { root_id })?;
    if root.is_deleted() {
        return Err(ExpedienteError::RootDeleted { root_id });
    }

    let mut resolved = ResolvedTree {
        root_id,
        ..ResolvedTree::default()
    };
    let mut excluded: HashSet<FolderId> = HashSet::new();
    let mut on_path: HashSet<FolderId> = HashSet::new();

    let root_segment = sanitize_segment(&root.name);
    let mut stack = vec![Frame::Enter {
        id: root_id,
        segment: root_segment,
        parent_path: String::new(),
        depth: 0,
    }];

    while let Some(frame) = stack.pop() {
        let (id, segment, parent_path, depth) = match frame {
            Frame::Leave(id) => {
                on_path.remove(&id);
                continue;
            }
            Frame::Enter {
                id,
                segment,
                parent_path,
                depth,
            } => (id, segment, parent_path, depth),
        };

        if !on_path.insert(id) || resolved.index.contains_key(&id) {
            return Err(ExpedienteError::CycleDetected { folder_id: id });
        }

        let path = if id == root_id && options.root_mode == RootMode::Relative {
            String::new()
        } else {
            join_path(&parent_path, &segment)
        };

        stack.push(Frame::Leave(id));

        let mut taken: HashSet<String> = HashSet::new();
        let mut scheduled = Vec::new();
        for &child_id in tree.children_of(id) {
            let Some(child) = tree.get(child_id) else {
                continue;
            };

            let mut child_segment = sanitize_segment(&child.name);
            if taken.contains(&child_segment) {
                match options.collision {
                    CollisionPolicy::Skip => {
                        resolved.issues.record(ExportIssue::FolderNameCollision {
                            folder_id: child_id,
                            parent_path: path.clone(),
                            name: child_segment,
                            resolved_as: None,
                        });
                        excluded.insert(child_id);
                        continue;
                    }
                    CollisionPolicy::Disambiguate => {
                        let original = child_segment.clone();
                        while taken.contains(&child_segment) {
                            child_segment = disambiguate_dir(&child_segment, child_id);
                        }
                        resolved.issues.record(ExportIssue::FolderNameCollision {
                            folder_id: child_id,
                            parent_path: path.clone(),
                            name: original,
                            resolved_as: Some(child_segment.clone()),
                        });
                    }
                }
            }
            taken.insert(child_segment.clone());

            scheduled.push(Frame::Enter {
                id: child_id,
                segment: child_segment,
                parent_path: path.clone(),
                depth: depth + 1,
            });
        }
        // Reverse so siblings pop in arrival order
        stack.extend(scheduled.into_iter().rev());
        if !taken.is_empty() {
            resolved.child_segments.insert(id, taken);
        }

        resolved.index.insert(id, resolved.folders.len());
        resolved.folders.push(ResolvedFolder {
            id,
            name: segment,
            path,
            depth,
        });
    }

    report_unreachable(tree, &mut resolved, &excluded);

    tracing::debug!(
        component = module_path!(),
        root_id,
        folder_count = resolved.folders.len(),
        "folder paths resolved"
    );

    Ok(resolved)
}

/// Record live folders that are neither resolved nor below a skipped or deleted folder
fn report_unreachable(tree: &FolderTree, resolved: &mut ResolvedTree, excluded: &HashSet<FolderId>) {
    for folder in tree.folders() {
        if folder.is_deleted() || resolved.index.contains_key(&folder.id) {
            continue;
        }

        let mut current = Some(folder.id);
        let mut steps = 0;
        let mut explained = false;
        while let Some(id) = current {
            if steps > tree.len() {
                break;
            }
            steps += 1;
            if excluded.contains(&id) {
                explained = true;
                break;
            }
            match tree.get(id) {
                Some(f) if f.is_deleted() => {
                    explained = true;
                    break;
                }
                Some(f) => current = f.effective_parent(),
                None => break,
            }
        }

        if !explained {
            resolved
                .issues
                .record(ExportIssue::UnreachableFolder { folder_id: folder.id });
        }
    }
}

//! Document binding
//!
//! Joins document rows to resolved folder paths, producing the staging plan.

use std::collections::HashSet;

use crate::issues::{ExportIssue, IssueLog, SkipReason};
use crate::model::{disambiguate_file, sanitize_segment, Document, FolderId, StagingEntry};
use crate::policy::CollisionPolicy;
use crate::tree::{FolderTree, ResolvedTree};

/// Staging plan produced by the binder
#[derive(Debug, Clone, Default)]
pub struct BindOutcome {
    /// Entries in document arrival order
    pub entries: Vec<StagingEntry>,
    /// Deleted or trashed documents filtered out
    pub filtered: usize,
    pub issues: IssueLog,
}

/// Bind documents to their owning folders' resolved paths
///
/// Documents whose folder was not resolved are dropped and reported, never
/// fatal. The report distinguishes folders known to the source rows
/// (`SkippedDocument`) from ids that never appeared (`UnknownFolder`).
///
/// Child directories claim their names before any document does, so a
/// document named like a sibling directory is a `DocumentNameCollision`
/// handled by `collision`, the same as two documents sharing a name.
pub fn bind_documents<I>(
    tree: &FolderTree,
    resolved: &ResolvedTree,
    documents: I,
    collision: CollisionPolicy,
) -> BindOutcome
where
    I: IntoIterator<Item = Document>,
{
    let mut outcome = BindOutcome::default();
    let mut destinations: HashSet<(FolderId, String)> = resolved
        .folders()
        .iter()
        .flat_map(|folder| {
            resolved
                .child_segments(folder.id)
                .map(move |name| (folder.id, name.to_string()))
        })
        .collect();

    for doc in documents {
        if !doc.is_live() {
            outcome.filtered += 1;
            continue;
        }

        let Some(folder_path) = resolved.path_of(doc.folder_id) else {
            let issue = if tree.contains(doc.folder_id) {
                ExportIssue::SkippedDocument {
                    document_id: doc.id,
                    folder_id: doc.folder_id,
                    reason: SkipReason::FolderNotResolved,
                }
            } else {
                ExportIssue::UnknownFolder {
                    document_id: doc.id,
                    folder_id: doc.folder_id,
                }
            };
            outcome.issues.record(issue);
            continue;
        };

        let mut file_name = sanitize_segment(doc.display_name());
        if destinations.contains(&(doc.folder_id, file_name.clone())) {
            let destination = crate::model::join_path(folder_path, &file_name);
            match collision {
                CollisionPolicy::Skip => {
                    outcome.issues.record(ExportIssue::DocumentNameCollision {
                        document_id: doc.id,
                        destination,
                        resolved_as: None,
                    });
                    continue;
                }
                CollisionPolicy::Disambiguate => {
                    while destinations.contains(&(doc.folder_id, file_name.clone())) {
                        file_name = disambiguate_file(&file_name, doc.id);
                    }
                    outcome.issues.record(ExportIssue::DocumentNameCollision {
                        document_id: doc.id,
                        destination,
                        resolved_as: Some(file_name.clone()),
                    });
                }
            }
        }
        destinations.insert((doc.folder_id, file_name.clone()));

        outcome.entries.push(StagingEntry {
            document_id: doc.id,
            folder_id: doc.folder_id,
            stored_name: doc.stored_name,
            destination_dir: folder_path.to_string(),
            file_name,
        });
    }

    tracing::debug!(
        component = module_path!(),
        entry_count = outcome.entries.len(),
        filtered = outcome.filtered,
        skipped = outcome.issues.len(),
        "documents bound"
    );

    outcome
}

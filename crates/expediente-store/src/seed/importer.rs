//! Seed importer
//!
//! Writes a validated seed into the `folders` and `documents` tables in a
//! single transaction. Rows are upserted by id, so re-importing a seed is
//! idempotent.

use crate::errors::{from_rusqlite, Result};
use crate::seed::format_v0::SeedV0;
use crate::seed::parse_seed_file;
use rusqlite::{params, Connection};
use std::path::Path;

/// Row counts written by one import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub folders: usize,
    pub documents: usize,
}

/// Parse, validate and import a seed file
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<ImportSummary> {
    let seed = parse_seed_file(path)?;
    let summary = import_seed_v0(&seed, conn)?;

    tracing::info!(
        component = module_path!(),
        path = %path.display(),
        folder_count = summary.folders,
        document_count = summary.documents,
        "seed imported"
    );

    Ok(summary)
}

/// Import an already parsed seed
pub fn import_seed_v0(seed: &SeedV0, conn: &mut Connection) -> Result<ImportSummary> {
    let tx = conn.transaction().map_err(from_rusqlite)?;

    {
        let mut insert_folder = tx
            .prepare(
                "INSERT OR REPLACE INTO folders (id, parent_id, name, deleted)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(from_rusqlite)?;
        for folder in &seed.folders {
            insert_folder
                .execute(params![folder.id, folder.parent, folder.name, folder.deleted])
                .map_err(|e| from_rusqlite(e).with_entity_id(folder.id))?;
        }

        let mut insert_document = tx
            .prepare(
                "INSERT OR REPLACE INTO documents
                    (id, agent, folder_id, stored_name, real_name, deleted, trashed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .map_err(from_rusqlite)?;
        for doc in &seed.documents {
            insert_document
                .execute(params![
                    doc.id,
                    doc.agent,
                    doc.folder,
                    doc.stored_name,
                    doc.real_name,
                    doc.deleted,
                    doc.trashed
                ])
                .map_err(|e| from_rusqlite(e).with_entity_id(doc.id))?;
        }
    }

    tx.commit().map_err(from_rusqlite)?;

    Ok(ImportSummary {
        folders: seed.folders.len(),
        documents: seed.documents.len(),
    })
}

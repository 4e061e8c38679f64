//! SQLite-backed folder store gateway

use std::path::Path;

use expediente_core::gateway::{FolderGateway, GatewayResult};
use expediente_core::model::{Document, Folder, FolderId};
use rusqlite::{params_from_iter, Connection, Row};

use crate::db;
use crate::errors::{from_rusqlite, Result};

/// Maximum number of folder ids bound into one `IN (...)` list
pub const DOCUMENT_BATCH_SIZE: usize = 100;

// UNION (not UNION ALL) discards rows already produced, so cyclic parent
// links terminate instead of recursing forever.
const SUBTREE_SQL: &str = "
    WITH RECURSIVE subtree(id) AS (
        SELECT id FROM folders WHERE id = ?1 AND deleted = 0
        UNION
        SELECT f.id FROM folders f
        JOIN subtree s ON f.parent_id = s.id
        WHERE f.deleted = 0 AND f.id <> f.parent_id
    )
    SELECT f.id, f.parent_id, f.name, f.deleted
    FROM folders f
    JOIN subtree s ON f.id = s.id
    ORDER BY f.id";

/// Folder gateway over the `folders` and `documents` tables
pub struct SqliteFolderStore {
    conn: Connection,
}

impl SqliteFolderStore {
    /// Wrap an already configured and migrated connection
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open, configure and migrate the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(db::open_migrated(path)?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    fn load_document_batch(&self, batch: &[FolderId], out: &mut Vec<Document>) -> Result<()> {
        let placeholders = vec!["?"; batch.len()].join(", ");
        let sql = format!(
            "SELECT id, agent, folder_id, stored_name,
                    COALESCE(NULLIF(TRIM(real_name), ''), stored_name),
                    deleted, trashed
             FROM documents
             WHERE deleted = 0 AND trashed = 0 AND folder_id IN ({})
             ORDER BY id",
            placeholders
        );

        let mut stmt = self.conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(params_from_iter(batch.iter()), document_from_row)
            .map_err(from_rusqlite)?;
        for row in rows {
            out.push(row.map_err(from_rusqlite)?);
        }
        Ok(())
    }
}

fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get(0)?,
        parent_id: row.get(1)?,
        name: row.get(2)?,
        deleted: row.get(3)?,
    })
}

fn document_from_row(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        agent: row.get(1)?,
        folder_id: row.get(2)?,
        stored_name: row.get(3)?,
        real_name: row.get(4)?,
        deleted: row.get(5)?,
        trashed: row.get(6)?,
    })
}

impl FolderGateway for SqliteFolderStore {
    fn load_folders(&self, root_id: FolderId) -> GatewayResult<Vec<Folder>> {
        let mut stmt = self.conn.prepare(SUBTREE_SQL).map_err(from_rusqlite)?;
        let folders = stmt
            .query_map([root_id], folder_from_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| from_rusqlite(e).with_entity_id(root_id))?;

        tracing::debug!(
            component = module_path!(),
            root_id,
            folder_count = folders.len(),
            "folder rows loaded"
        );
        Ok(folders)
    }

    fn load_documents(&self, folder_ids: &[FolderId]) -> GatewayResult<Vec<Document>> {
        let mut documents = Vec::new();
        for batch in folder_ids.chunks(DOCUMENT_BATCH_SIZE) {
            self.load_document_batch(batch, &mut documents)?;
        }

        tracing::debug!(
            component = module_path!(),
            folder_count = folder_ids.len(),
            document_count = documents.len(),
            "document rows loaded"
        );
        Ok(documents)
    }
}

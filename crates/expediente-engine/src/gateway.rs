//! Opening the database-backed gateway used by export runs

use std::path::Path;

use expediente_store::errors::Result;
use expediente_store::{RetryPolicy, RetryingGateway, SqliteFolderStore};

/// Open the folder database at `db_path` behind a retrying gateway
///
/// Opening is retried under the same policy as the row queries, since a
/// locked database at open time is as transient as one at query time.
pub fn open_sqlite_gateway(
    db_path: &Path,
    policy: RetryPolicy,
) -> Result<RetryingGateway<SqliteFolderStore>> {
    let store = policy.run("open_database", || SqliteFolderStore::open(db_path))?;
    Ok(RetryingGateway::new(store, policy))
}

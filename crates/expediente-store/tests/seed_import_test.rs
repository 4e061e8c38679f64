// Integration tests for seed parsing and import

use std::path::PathBuf;

use expediente_core::{FolderGateway, ExErrorKind};
use expediente_store::seed::{import_seed, parse_seed_file, parse_seed_str};
use expediente_store::SqliteFolderStore;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn migrated_store() -> SqliteFolderStore {
    let mut conn = rusqlite::Connection::open_in_memory().unwrap();
    expediente_store::migrations::apply_migrations(&mut conn).unwrap();
    SqliteFolderStore::new(conn)
}

#[test]
fn test_parse_minimal_seed() {
    let seed = parse_seed_file(&fixtures_dir().join("seed_minimal.yaml")).unwrap();

    assert_eq!(seed.schema_version, 0);
    assert_eq!(seed.folders.len(), 2);
    assert_eq!(seed.documents[0].stored_name, "doc1");
}

#[test]
fn test_parse_rejects_bad_version() {
    let err = parse_seed_file(&fixtures_dir().join("seed_bad_version.yaml")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_parse_missing_file_reports_path() {
    let err = parse_seed_file(&fixtures_dir().join("nope.yaml")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert!(err.path().is_some_and(|p| p.ends_with("nope.yaml")));
}

#[test]
fn test_parse_malformed_yaml_is_serialization_error() {
    let err = parse_seed_str("schema_version: [unclosed").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Serialization);
    assert!(!err.is_transient());
}

#[test]
fn test_import_then_load_through_gateway() {
    let mut store = migrated_store();
    let summary = import_seed(
        &fixtures_dir().join("seed_minimal.yaml"),
        store.connection_mut(),
    )
    .unwrap();
    assert_eq!(summary.folders, 2);
    assert_eq!(summary.documents, 1);

    let folders = store.load_folders(1).unwrap();
    assert_eq!(folders.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);

    let docs = store.load_documents(&[1, 2]).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].real_name, "report.pdf");
    assert_eq!(docs[0].agent, "clerk");
}

#[test]
fn test_import_is_idempotent() {
    let mut store = migrated_store();
    let path = fixtures_dir().join("seed_mixed.yaml");
    import_seed(&path, store.connection_mut()).unwrap();
    import_seed(&path, store.connection_mut()).unwrap();

    let count: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 7);
}

#[test]
fn test_mixed_seed_excludes_deleted_and_trashed() {
    let mut store = migrated_store();
    import_seed(&fixtures_dir().join("seed_mixed.yaml"), store.connection_mut()).unwrap();

    let folder_ids: Vec<_> = store
        .load_folders(1)
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(folder_ids, vec![1, 2, 3, 6]);

    let doc_ids: Vec<_> = store
        .load_documents(&folder_ids)
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(doc_ids, vec![20, 21, 22]);
}

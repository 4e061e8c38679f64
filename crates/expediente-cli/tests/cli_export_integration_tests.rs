//! CLI integration tests for seed import, plan and export

use flate2::read::GzDecoder;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SEED: &str = r#"
schema_version: 0
folders:
  - id: 1
    name: A
  - id: 2
    parent: 1
    name: B
documents:
  - id: 10
    agent: clerk
    folder: 2
    stored_name: doc1
    real_name: report.pdf
  - id: 11
    agent: clerk
    folder: 1
    stored_name: doc2
    real_name: missing.txt
"#;

const CYCLIC_SEED: &str = r#"
schema_version: 0
folders:
  - id: 1
    parent: 3
    name: A
  - id: 2
    parent: 1
    name: B
  - id: 3
    parent: 2
    name: C
"#;

fn cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_expediente"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn seeded(seed: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("seed.yaml"), seed).unwrap();
    let output = cli(temp.path(), &["seed", "import", "seed.yaml", "--db", "store.db"]);
    assert!(
        output.status.success(),
        "seed import failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    temp
}

fn archive_entries(path: &Path) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| {
            archive
                .by_index(i)
                .unwrap()
                .name()
                .trim_end_matches('/')
                .to_string()
        })
        .collect();
    names.sort();
    names
}

fn tar_gz_entries(path: &Path) -> Vec<String> {
    let file = fs::File::open(path).unwrap();
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    let mut names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .unwrap()
                .to_string_lossy()
                .trim_end_matches('/')
                .to_string()
        })
        .collect();
    names.sort();
    names
}

#[test]
fn test_seed_import_creates_database() {
    let temp = seeded(SEED);

    let conn = rusqlite::Connection::open(temp.path().join("store.db")).unwrap();
    let folders: i64 = conn
        .query_row("SELECT COUNT(*) FROM folders", [], |row| row.get(0))
        .unwrap();
    let documents: i64 = conn
        .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
        .unwrap();
    assert_eq!(folders, 2);
    assert_eq!(documents, 2);
}

#[test]
fn test_export_writes_archive() {
    let temp = seeded(SEED);
    fs::create_dir(temp.path().join("content")).unwrap();
    fs::write(temp.path().join("content/doc1"), b"pdf bytes").unwrap();

    let output = cli(
        temp.path(),
        &[
            "export",
            "--root",
            "1",
            "--db",
            "store.db",
            "--source-base",
            "content",
            "--staging-dir",
            "staging",
            "--output",
            "out/expediente.zip",
        ],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Exported root 1"));
    assert!(stdout.contains("ERR_MISSING_SOURCE_FILE: 1"));

    let entries = archive_entries(&temp.path().join("out/expediente.zip"));
    assert_eq!(entries, vec!["A", "A/B", "A/B/report.pdf", "A/missing.txt"]);
}

#[test]
fn test_export_tar_gz_on_request() {
    let temp = seeded(SEED);

    let output = cli(
        temp.path(),
        &[
            "export",
            "--root",
            "1",
            "--db",
            "store.db",
            "--staging-dir",
            "staging",
            "--archive-format",
            "tar_gz",
            "--output",
            "out.tar.gz",
        ],
    );
    assert!(output.status.success());

    let entries = tar_gz_entries(&temp.path().join("out.tar.gz"));
    assert_eq!(entries, vec!["A", "A/B", "A/B/report.pdf", "A/missing.txt"]);
}

#[test]
fn test_export_json_report() {
    let temp = seeded(SEED);

    let output = cli(
        temp.path(),
        &[
            "export",
            "--root",
            "1",
            "--db",
            "store.db",
            "--staging-dir",
            "staging",
            "--output",
            "out.zip",
            "--cleanup-staging",
            "--json",
        ],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["root_id"], 1);
    assert_eq!(report["folders"], 2);
    assert_eq!(report["documents"], 2);
    assert_eq!(report["placeholders"], 2);
    assert_eq!(report["archive_format"], "zip");
    assert!(report["staging_dir"].is_null());
    assert_eq!(fs::read_dir(temp.path().join("staging")).unwrap().count(), 0);
}

#[test]
fn test_export_cycle_fails_without_archive() {
    let temp = seeded(CYCLIC_SEED);

    let output = cli(
        temp.path(),
        &[
            "export",
            "--root",
            "1",
            "--db",
            "store.db",
            "--staging-dir",
            "staging",
            "--output",
            "out.zip",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("ERR_CYCLE_DETECTED"));
    assert!(!temp.path().join("out.zip").exists());
}

#[test]
fn test_export_unknown_root_fails() {
    let temp = seeded(SEED);

    let output = cli(temp.path(), &["export", "--root", "99", "--db", "store.db", "--staging-dir", "staging"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_plan_lists_layout() {
    let temp = seeded(SEED);

    let output = cli(temp.path(), &["plan", "--root", "1", "--db", "store.db"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A/B/"));
    assert!(stdout.contains("A/B/report.pdf  <- doc1"));
    assert!(stdout.contains("2 folders, 2 documents"));
    assert!(!temp.path().join("staging").exists());
}

#[test]
fn test_config_file_sets_defaults_and_flags_override() {
    let temp = seeded(SEED);
    fs::write(
        temp.path().join("expediente.toml"),
        "db = \"store.db\"\nroot_mode = \"relative\"\n",
    )
    .unwrap();

    let output = cli(temp.path(), &["plan", "--root", "1", "--json"]);
    assert!(
        output.status.success(),
        "plan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> = plan["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["", "B"]);

    let output = cli(temp.path(), &["plan", "--root", "1", "--json", "--root-mode", "inclusive"]);
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["folders"][1]["path"], "A/B");
}

#[test]
fn test_environment_overrides_config() {
    let temp = seeded(SEED);

    let output = Command::new(env!("CARGO_BIN_EXE_expediente"))
        .current_dir(temp.path())
        .env("RUST_LOG", "off")
        .env("EXPEDIENTE_WORKERS", "0")
        .args(["export", "--root", "1", "--db", "store.db", "--staging-dir", "staging"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("workers must be at least 1"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp = seeded(SEED);

    let output = cli(temp.path(), &["plan", "--root", "1", "--config", "absent.toml"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}

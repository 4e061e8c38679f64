use std::fs::File;
use std::path::{Path, PathBuf};

use expediente_core::{Document, Folder, MemoryGateway};
use expediente_engine::ExportSettings;
use flate2::read::GzDecoder;
use tempfile::TempDir;

/// Temp workspace with `source/`, `staging/` and `out/` below it
#[allow(dead_code)]
pub struct Workspace {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("source")).unwrap();
        Self { dir }
    }

    pub fn source(&self) -> PathBuf {
        self.dir.path().join("source")
    }

    pub fn staging(&self) -> PathBuf {
        self.dir.path().join("staging")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("out").join("export.zip")
    }

    pub fn settings(&self) -> ExportSettings {
        ExportSettings {
            source_base: self.source(),
            staging_dir: self.staging(),
            output_path: self.output(),
            ..ExportSettings::default()
        }
    }

    pub fn write_source(&self, stored_name: &str, content: &[u8]) {
        std::fs::write(self.source().join(stored_name), content).unwrap();
    }

    /// Run directories currently under the staging base
    pub fn run_dirs(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.staging()) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Root `A`(1) with child `B`(2) and `doc1` filed in B as `report.pdf`
#[allow(dead_code)]
pub fn report_gateway() -> MemoryGateway {
    MemoryGateway::new(
        vec![Folder::new(1, None, "A"), Folder::new(2, Some(1), "B")],
        vec![Document::new(10, 2, "doc1", "report.pdf")],
    )
}

fn is_zip(archive: &Path) -> bool {
    archive.extension().is_some_and(|ext| ext == "zip")
}

/// Sorted entry names in a `.zip` or `.tar.gz`, without trailing slashes
#[allow(dead_code)]
pub fn archive_entries(archive: &Path) -> Vec<String> {
    let mut names: Vec<String> = if is_zip(archive) {
        let mut reader = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..reader.len())
            .map(|i| reader.by_index(i).unwrap().name().to_string())
            .collect()
    } else {
        let mut reader = tar::Archive::new(GzDecoder::new(File::open(archive).unwrap()));
        reader
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect()
    };
    for name in &mut names {
        let trimmed = name.trim_end_matches('/').len();
        name.truncate(trimmed);
    }
    names.sort();
    names
}

/// Size of one file entry in a `.zip` or `.tar.gz`
#[allow(dead_code)]
pub fn archive_entry_size(archive: &Path, name: &str) -> Option<u64> {
    if is_zip(archive) {
        let mut reader = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        let size = reader.by_name(name).ok().map(|entry| entry.size());
        return size;
    }

    let mut reader = tar::Archive::new(GzDecoder::new(File::open(archive).unwrap()));
    for entry in reader.entries().unwrap() {
        let entry = entry.unwrap();
        if entry.path().unwrap().to_string_lossy() == name {
            return Some(entry.header().size().unwrap());
        }
    }
    None
}

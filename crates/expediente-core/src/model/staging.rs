use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DocumentId, FolderId};

/// Separator used in resolved paths, independent of the host platform
pub const PATH_SEPARATOR: char = '/';

/// One file to place in the staging area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingEntry {
    pub document_id: DocumentId,
    pub folder_id: FolderId,

    /// Content file name under the source base directory
    pub stored_name: String,

    /// Resolved path of the owning folder
    pub destination_dir: String,

    /// Sanitized real name the file is staged under
    pub file_name: String,
}

impl StagingEntry {
    /// `/`-joined destination relative to the staging root
    pub fn destination_path(&self) -> String {
        join_path(&self.destination_dir, &self.file_name)
    }

    /// Destination directory on disk below `staging_root`
    pub fn destination_dir_in(&self, staging_root: &Path) -> PathBuf {
        relative_to(staging_root, &self.destination_dir)
    }

    /// Destination file on disk below `staging_root`
    pub fn destination_in(&self, staging_root: &Path) -> PathBuf {
        self.destination_dir_in(staging_root).join(&self.file_name)
    }

    /// Source file below `source_base`
    ///
    /// Returns `None` when the stored name would escape the base directory
    /// (absolute paths, `..` components).
    pub fn source_in(&self, source_base: &Path) -> Option<PathBuf> {
        let stored = Path::new(&self.stored_name);
        let mut path = source_base.to_path_buf();
        let mut pushed = false;
        for component in stored.components() {
            match component {
                Component::Normal(part) => {
                    path.push(part);
                    pushed = true;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        pushed.then_some(path)
    }
}

/// Map a `/`-joined resolved path onto the host filesystem below `root`
pub fn relative_to(root: &Path, resolved: &str) -> PathBuf {
    resolved
        .split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Join a parent path and a segment with the path separator
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else if segment.is_empty() {
        parent.to_string()
    } else {
        format!("{}{}{}", parent, PATH_SEPARATOR, segment)
    }
}

/// Reduce a folder or file name to a single safe path segment
///
/// Separators and NUL become `_`; empty, `.` and `..` become `_`.
pub fn sanitize_segment(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Disambiguate a folder segment by appending the owning id
pub fn disambiguate_dir(segment: &str, id: i64) -> String {
    format!("{} ({})", segment, id)
}

/// Disambiguate a file name by inserting the owning id before the extension
pub fn disambiguate_file(file_name: &str, id: i64) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            let (stem, ext) = file_name.split_at(dot);
            format!("{} ({}){}", stem, id, ext)
        }
        _ => format!("{} ({})", file_name, id),
    }
}

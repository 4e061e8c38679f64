pub mod document;
pub mod folder;
pub mod staging;

pub use document::{Document, DocumentId};
pub use folder::{Folder, FolderId, ResolvedFolder};
pub use staging::{
    disambiguate_dir, disambiguate_file, join_path, relative_to, sanitize_segment, StagingEntry,
    PATH_SEPARATOR,
};

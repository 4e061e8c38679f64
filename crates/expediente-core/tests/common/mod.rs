use expediente_core::{Document, Folder, FolderId};

/// Live folder row
#[allow(dead_code)]
pub fn folder(id: FolderId, parent: Option<FolderId>, name: &str) -> Folder {
    Folder::new(id, parent, name)
}

/// Folder row flagged deleted
#[allow(dead_code)]
pub fn deleted_folder(id: FolderId, parent: Option<FolderId>, name: &str) -> Folder {
    let mut f = Folder::new(id, parent, name);
    f.deleted = true;
    f
}

/// Live document whose stored name is derived from its id
#[allow(dead_code)]
pub fn document(id: i64, folder_id: FolderId, real_name: &str) -> Document {
    Document::new(id, folder_id, format!("content-{}", id), real_name)
}

/// Root 1 "A" with child 2 "B"
#[allow(dead_code)]
pub fn two_level() -> Vec<Folder> {
    vec![folder(1, None, "A"), folder(2, Some(1), "B")]
}

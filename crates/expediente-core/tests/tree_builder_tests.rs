mod common;

use common::{deleted_folder, folder};
use expediente_core::{build_tree, ExErrorKind, ExportIssue};

#[test]
fn test_rows_in_any_order_link_to_parents() {
    let tree = build_tree(vec![
        folder(4, Some(3), "D"),
        folder(3, Some(1), "C"),
        folder(1, None, "A"),
        folder(2, Some(1), "B"),
    ]);

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.children_of(1), &[3, 2]);
    assert_eq!(tree.children_of(3), &[4]);
}

#[test]
fn test_self_parent_is_root_marker() {
    let tree = build_tree(vec![folder(1, Some(1), "A"), folder(2, Some(1), "B")]);

    assert_eq!(tree.children_of(1), &[2]);
    assert_eq!(tree.get(1).and_then(|f| f.effective_parent()), None);
}

#[test]
fn test_deleted_folder_is_known_but_not_linked() {
    let tree = build_tree(vec![
        folder(1, None, "A"),
        deleted_folder(2, Some(1), "Gone"),
        folder(3, Some(2), "Below"),
    ]);

    assert!(tree.contains(2));
    assert!(tree.children_of(1).is_empty());
    assert_eq!(tree.children_of(2), &[3]);
}

#[test]
fn test_conflicting_parent_keeps_first_row() {
    let tree = build_tree(vec![
        folder(1, None, "A"),
        folder(2, None, "B"),
        folder(3, Some(1), "C"),
        folder(3, Some(2), "C"),
    ]);

    assert_eq!(tree.children_of(1), &[3]);
    assert!(tree.children_of(2).is_empty());
    assert_eq!(tree.issues().len(), 1);
    assert!(matches!(
        tree.issues().issues()[0],
        ExportIssue::ConflictingParent {
            folder_id: 3,
            kept_parent: Some(1),
            ignored_parent: Some(2),
        }
    ));
    assert_eq!(tree.issues().count_kind(ExErrorKind::DataIntegrity), 1);
}

#[test]
fn test_empty_input() {
    let tree = build_tree(Vec::new());
    assert!(tree.is_empty());
    assert!(tree.children_of(1).is_empty());
}

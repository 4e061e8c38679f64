mod common;

use common::{deleted_folder, folder, two_level};
use expediente_core::{
    build_tree, resolve_paths, CollisionPolicy, ExportIssue, ExpedienteError, ResolveOptions,
    RootMode,
};

fn options(root_mode: RootMode, collision: CollisionPolicy) -> ResolveOptions {
    ResolveOptions {
        root_mode,
        collision,
    }
}

#[test]
fn test_inclusive_mode_prefixes_root_name() {
    let tree = build_tree(two_level());
    let resolved = resolve_paths(&tree, 1, &ResolveOptions::default()).unwrap();

    assert_eq!(resolved.path_of(1), Some("A"));
    assert_eq!(resolved.path_of(2), Some("A/B"));
    assert_eq!(resolved.get(2).map(|f| f.depth), Some(1));
}

#[test]
fn test_relative_mode_omits_root_name() {
    let tree = build_tree(two_level());
    let opts = options(RootMode::Relative, CollisionPolicy::Disambiguate);
    let resolved = resolve_paths(&tree, 1, &opts).unwrap();

    assert_eq!(resolved.path_of(1), Some(""));
    assert_eq!(resolved.path_of(2), Some("B"));
}

#[test]
fn test_export_from_inner_root() {
    let tree = build_tree(vec![
        folder(1, None, "A"),
        folder(2, Some(1), "B"),
        folder(3, Some(2), "C"),
        folder(4, Some(1), "Sibling"),
    ]);
    let resolved = resolve_paths(&tree, 2, &ResolveOptions::default()).unwrap();

    assert_eq!(resolved.ids(), vec![2, 3]);
    assert_eq!(resolved.path_of(3), Some("B/C"));
    assert_eq!(resolved.path_of(4), None);
}

#[test]
fn test_deleted_root_is_fatal() {
    let tree = build_tree(vec![deleted_folder(1, None, "A")]);
    let result = resolve_paths(&tree, 1, &ResolveOptions::default());
    assert_eq!(result.unwrap_err(), ExpedienteError::RootDeleted { root_id: 1 });
}

#[test]
fn test_cycle_is_fatal() {
    let tree = build_tree(vec![
        folder(1, Some(2), "A"),
        folder(2, Some(1), "B"),
    ]);
    let result = resolve_paths(&tree, 1, &ResolveOptions::default());
    assert!(matches!(result, Err(ExpedienteError::CycleDetected { .. })));
}

#[test]
fn test_cycle_outside_root_is_reported_not_fatal() {
    let tree = build_tree(vec![
        folder(1, None, "A"),
        folder(5, Some(6), "X"),
        folder(6, Some(5), "Y"),
    ]);
    let resolved = resolve_paths(&tree, 1, &ResolveOptions::default()).unwrap();

    assert_eq!(resolved.ids(), vec![1]);
    let unreachable: Vec<_> = resolved
        .issues()
        .issues()
        .iter()
        .filter_map(|i| match i {
            ExportIssue::UnreachableFolder { folder_id } => Some(*folder_id),
            _ => None,
        })
        .collect();
    assert_eq!(unreachable, vec![5, 6]);
}

#[test]
fn test_deleted_subtree_is_not_materialized_or_reported() {
    let tree = build_tree(vec![
        folder(1, None, "A"),
        deleted_folder(2, Some(1), "Gone"),
        folder(3, Some(2), "Below"),
    ]);
    let resolved = resolve_paths(&tree, 1, &ResolveOptions::default()).unwrap();

    assert_eq!(resolved.ids(), vec![1]);
    assert!(resolved.issues().is_empty());
}

#[test]
fn test_duplicate_sibling_names_disambiguated() {
    let tree = build_tree(vec![
        folder(1, None, "A"),
        folder(2, Some(1), "Same"),
        folder(3, Some(1), "Same"),
        folder(4, Some(3), "Child"),
    ]);
    let resolved = resolve_paths(&tree, 1, &ResolveOptions::default()).unwrap();

    assert_eq!(resolved.path_of(2), Some("A/Same"));
    assert_eq!(resolved.path_of(3), Some("A/Same (3)"));
    assert_eq!(resolved.path_of(4), Some("A/Same (3)/Child"));
    assert!(matches!(
        &resolved.issues().issues()[0],
        ExportIssue::FolderNameCollision { folder_id: 3, resolved_as: Some(name), .. }
            if name == "Same (3)"
    ));
}

#[test]
fn test_duplicate_sibling_names_skipped() {
    let tree = build_tree(vec![
        folder(1, None, "A"),
        folder(2, Some(1), "Same"),
        folder(3, Some(1), "Same"),
        folder(4, Some(3), "Child"),
    ]);
    let opts = options(RootMode::Inclusive, CollisionPolicy::Skip);
    let resolved = resolve_paths(&tree, 1, &opts).unwrap();

    assert_eq!(resolved.ids(), vec![1, 2]);
    assert_eq!(resolved.path_of(3), None);
    assert_eq!(resolved.path_of(4), None);
    // The skipped folder's subtree is explained by the collision, not reported as unreachable
    assert_eq!(resolved.issues().len(), 1);
}

#[test]
fn test_unsafe_names_are_sanitized() {
    let tree = build_tree(vec![
        folder(1, None, "A/B"),
        folder(2, Some(1), ".."),
        folder(3, Some(1), "C\\D"),
    ]);
    let resolved = resolve_paths(&tree, 1, &ResolveOptions::default()).unwrap();

    assert_eq!(resolved.path_of(1), Some("A_B"));
    assert_eq!(resolved.path_of(2), Some("A_B/_"));
    assert_eq!(resolved.path_of(3), Some("A_B/C_D"));
}

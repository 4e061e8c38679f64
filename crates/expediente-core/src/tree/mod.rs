//! Folder tree construction and path resolution
//!
//! - `builder`: flat folder rows to an adjacency structure
//! - `resolver`: depth-first path assignment from the export root with cycle detection

pub mod builder;
pub mod resolver;

pub use builder::{build_tree, FolderTree};
pub use resolver::{resolve_paths, ResolvedTree};

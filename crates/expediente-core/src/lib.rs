//! Expediente Core - folder tree resolution and document binding
//!
//! This crate turns parent-pointer folder rows into a resolved directory
//! layout and binds document rows onto it, producing the staging plan that
//! the engine materializes and archives:
//! - Folder/Document models and the `FolderGateway` row source
//! - Tree building from unordered rows (`tree::builder`)
//! - Depth-first path resolution with cycle detection (`tree::resolver`)
//! - Document binding with collision handling (`binder`)
//! - Error and logging facilities shared by the other crates
//!
//! Nothing here performs I/O.

pub mod binder;
pub mod errors;
pub mod gateway;
pub mod issues;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod tree;

// Re-export commonly used types
pub use binder::{bind_documents, BindOutcome};
pub use errors::{ExError, ExErrorKind, ExpedienteError, Result};
pub use gateway::{FolderGateway, GatewayResult, MemoryGateway};
pub use issues::{ExportIssue, IssueLog, Severity, SkipReason};
pub use model::{Document, DocumentId, Folder, FolderId, ResolvedFolder, StagingEntry};
pub use policy::{CollisionPolicy, ResolveOptions, RootMode};
pub use tree::{build_tree, resolve_paths, FolderTree, ResolvedTree};

//! Recoverable issues recorded during an export run
//!
//! Every non-fatal condition (skipped records, name collisions, placeholder
//! substitutions, staging failures) becomes an `ExportIssue`. Issues are
//! logged at warn/error level when recorded and returned in the run report.

use serde::Serialize;

use crate::errors::ExErrorKind;
use crate::model::{DocumentId, FolderId};

/// How bad an issue is for the resulting archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Archive is complete but differs from the source data in a known way
    Warning,
    /// Something that should have been staged is absent from the archive
    Error,
}

/// Why a document was left out of the staging plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The folder exists in the source rows but was not resolved (deleted, unreachable or skipped)
    FolderNotResolved,
    /// Another document already occupies the destination
    NameCollision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExportIssue {
    /// Duplicate folder row with a different parent; the later row was ignored
    ConflictingParent {
        folder_id: FolderId,
        kept_parent: Option<FolderId>,
        ignored_parent: Option<FolderId>,
    },

    /// Live folder row that cannot be reached from the export root
    UnreachableFolder { folder_id: FolderId },

    /// Two siblings share a name
    FolderNameCollision {
        folder_id: FolderId,
        parent_path: String,
        name: String,
        /// Segment used instead, or None when the folder was skipped
        resolved_as: Option<String>,
    },

    /// Two documents share a destination
    DocumentNameCollision {
        document_id: DocumentId,
        destination: String,
        /// File name used instead, or None when the document was skipped
        resolved_as: Option<String>,
    },

    /// Document dropped from the staging plan
    SkippedDocument {
        document_id: DocumentId,
        folder_id: FolderId,
        reason: SkipReason,
    },

    /// Document points at a folder id never present in the source rows
    UnknownFolder {
        document_id: DocumentId,
        folder_id: FolderId,
    },

    /// Source content absent; a zero-length placeholder was staged
    MissingSource {
        document_id: DocumentId,
        source: String,
        destination: String,
    },

    /// Copy failed for a reason other than absence; a placeholder was staged
    CopyFailed {
        document_id: DocumentId,
        source: String,
        destination: String,
        reason: String,
    },

    /// Directory or file could not be written; nothing was staged at `path`
    StagingFailure {
        path: String,
        document_id: Option<DocumentId>,
        reason: String,
    },
}

impl ExportIssue {
    /// Error kind this issue is classified under
    pub fn kind(&self) -> ExErrorKind {
        match self {
            ExportIssue::ConflictingParent { .. }
            | ExportIssue::UnreachableFolder { .. }
            | ExportIssue::UnknownFolder { .. } => ExErrorKind::DataIntegrity,
            ExportIssue::FolderNameCollision { .. } | ExportIssue::DocumentNameCollision { .. } => {
                ExErrorKind::NameCollision
            }
            ExportIssue::SkippedDocument { reason, .. } => match reason {
                SkipReason::FolderNotResolved => ExErrorKind::DataIntegrity,
                SkipReason::NameCollision => ExErrorKind::NameCollision,
            },
            ExportIssue::MissingSource { .. } => ExErrorKind::MissingSourceFile,
            ExportIssue::CopyFailed { .. } | ExportIssue::StagingFailure { .. } => {
                ExErrorKind::StagingIo
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ExportIssue::StagingFailure { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Emit this issue as a structured log event
    pub fn emit(&self) {
        let detail = format!("{:?}", self);
        match self.severity() {
            Severity::Warning => tracing::warn!(
                component = module_path!(),
                event = expediente_core_types::schema::EVENT_WARNING,
                err.code = self.code(),
                issue = %detail,
            ),
            Severity::Error => tracing::error!(
                component = module_path!(),
                event = expediente_core_types::schema::EVENT_WARNING,
                err.code = self.code(),
                issue = %detail,
            ),
        }
    }
}

/// Append-only issue list that logs as it records
#[derive(Debug, Clone, Default)]
pub struct IssueLog {
    issues: Vec<ExportIssue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, issue: ExportIssue) {
        issue.emit();
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: IssueLog) {
        self.issues.extend(other.issues);
    }

    pub fn issues(&self) -> &[ExportIssue] {
        &self.issues
    }

    pub fn into_vec(self) -> Vec<ExportIssue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Count issues classified under `kind`
    pub fn count_kind(&self, kind: ExErrorKind) -> usize {
        self.issues.iter().filter(|i| i.kind() == kind).count()
    }
}

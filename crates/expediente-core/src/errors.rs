use crate::model::{DocumentId, FolderId};
use expediente_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExpedienteError
pub type Result<T> = std::result::Result<T, ExpedienteError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// and recoverable issues raised during an export run. Each kind maps to a
/// stable error code that can be used for programmatic error handling,
/// testing, and the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    DataIntegrity,
    CycleDetected,
    NameCollision,

    // Staging/Archive
    MissingSourceFile,
    StagingIo,
    Archive,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,
    Timeout,
    Configuration,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DataIntegrity => "ERR_DATA_INTEGRITY",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::NameCollision => "ERR_NAME_COLLISION",
            ExErrorKind::MissingSourceFile => "ERR_MISSING_SOURCE_FILE",
            ExErrorKind::StagingIo => "ERR_STAGING_IO",
            ExErrorKind::Archive => "ERR_ARCHIVE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an operation failing with this kind may succeed if retried
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExErrorKind::ExternalService | ExErrorKind::Timeout
        )
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (folder or document id)
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add export run context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Whether retrying the failed operation may help
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for tree resolution, binding, staging and archiving
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpedienteError {
    // ===== Structural Errors =====
    /// The export root is not part of the loaded folder rows
    #[error("Export root folder not found: {root_id}")]
    RootNotFound { root_id: FolderId },

    /// The export root is flagged deleted
    #[error("Export root folder was deleted: {root_id}")]
    RootDeleted { root_id: FolderId },

    /// Cycle detected while walking the folder tree
    #[error("Cycle detected: folder {folder_id} is reachable from itself")]
    CycleDetected { folder_id: FolderId },

    // ===== Staging Errors =====
    /// Document content absent at staging time
    #[error("Source file for document {document_id} not found: {source_path}")]
    MissingSourceFile {
        document_id: DocumentId,
        source_path: String,
    },

    /// A directory or file operation failed inside the staging area
    #[error("Staging operation failed at {path}: {reason}")]
    StagingIo { path: String, reason: String },

    /// Archive creation failed
    #[error("Archive creation failed for {path}: {reason}")]
    Archive { path: String, reason: String },
}

impl From<ExpedienteError> for ExError {
    fn from(err: ExpedienteError) -> Self {
        let message = err.to_string();
        match err {
            ExpedienteError::RootNotFound { root_id } | ExpedienteError::RootDeleted { root_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(root_id)
                    .with_message(message)
            }

            ExpedienteError::CycleDetected { folder_id } => {
                ExError::new(ExErrorKind::CycleDetected)
                    .with_entity_id(folder_id)
                    .with_message(message)
            }

            ExpedienteError::MissingSourceFile {
                document_id,
                source_path,
            } => ExError::new(ExErrorKind::MissingSourceFile)
                .with_entity_id(document_id)
                .with_path(source_path)
                .with_message(message),

            ExpedienteError::StagingIo { path, .. } => ExError::new(ExErrorKind::StagingIo)
                .with_path(path)
                .with_message(message),

            ExpedienteError::Archive { path, .. } => ExError::new(ExErrorKind::Archive)
                .with_path(path)
                .with_message(message),
        }
    }
}

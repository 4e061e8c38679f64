//! Error handling for expediente-store
//!
//! Wraps expediente-core ExError with store-specific helpers

use expediente_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::DataIntegrity)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create a seed syntax error from a YAML parse failure
pub fn seed_syntax(err: serde_yaml::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("seed_parse")
        .with_message(format!("YAML parse error: {}", err))
}

/// Create a database error from rusqlite::Error
///
/// Only contention (busy, locked) and I/O-class failures are transient.
/// Everything else, such as SQL errors, missing tables or constraint
/// violations, maps to `Persistence` and is never retried.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    use rusqlite::ErrorCode;

    let kind = match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => ExErrorKind::Timeout,
        Some(ErrorCode::SystemIoFailure) | Some(ErrorCode::CannotOpen) => {
            ExErrorKind::ExternalService
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operation
//! boundaries. Every event carries `component`, `op` and `event` fields;
//! extra fields (`run_id`, `root_id`, counts) are passed through verbatim.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use expediente_core::log_op_start;
/// log_op_start!("export");
/// log_op_start!("export", root_id = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = expediente_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use expediente_core::log_op_end;
/// log_op_end!("export", duration_ms = 42);
/// log_op_end!("export", duration_ms = 42, warning_count = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = expediente_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError` and records its kind and
/// stable code.
///
/// # Example
///
/// ```ignore
/// # use expediente_core::{log_op_error, errors::ExpedienteError};
/// let err = ExpedienteError::RootNotFound { root_id: 3 };
/// log_op_error!("export", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = expediente_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = %ex_err,
            $($($field)*)?
        );
    }};
}

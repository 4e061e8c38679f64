//! Expediente Engine - export orchestration
//!
//! Coordinates the pure resolution pipeline in `expediente-core` with the
//! filesystem: staging the resolved tree on disk, copying document content
//! on a bounded worker pool, and packaging the result as a `.zip` (or a
//! `.tar.gz` when configured).
//!
//! The engine owns lifecycle logging (`log_op_start!`/`log_op_end!`/
//! `log_op_error!`) for the operations it exposes.

pub mod archive;
pub mod export;
pub mod gateway;
pub mod settings;
pub mod staging;

pub use export::{plan_export, run_export, ExportPlan, ExportReport};
pub use settings::{ArchiveFormat, ExportSettings, MissingSourcePolicy};

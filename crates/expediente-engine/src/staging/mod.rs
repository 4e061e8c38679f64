//! Staging executor
//!
//! Materializes a resolved tree and its staging entries below a run
//! directory: one sequential directory phase, then a parallel copy phase.

pub mod atomic;
pub mod executor;

pub use executor::{stage, StagingReport};

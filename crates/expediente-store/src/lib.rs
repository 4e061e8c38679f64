//! Expediente Store - SQLite persistence for folder and document rows
//!
//! Provides:
//! - Connection helpers and embedded, checksummed migrations
//! - `SqliteFolderStore`, the database-backed `FolderGateway`
//! - `RetryingGateway`, bounded retry with exponential backoff
//! - YAML seed import for fixtures and local testing

pub mod db;
pub mod errors;
pub mod gateway;
pub mod migrations;
pub mod retry;
pub mod seed;

pub use errors::Result;
pub use gateway::SqliteFolderStore;
pub use retry::{RetryPolicy, RetryingGateway};

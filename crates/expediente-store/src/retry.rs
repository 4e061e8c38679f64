//! Bounded retry with exponential backoff around a folder gateway
//!
//! Only transient failures (`ExError::is_transient`) are retried; everything
//! else is returned on the first attempt.

use std::time::Duration;

use expediente_core::errors::ExError;
use expediente_core::gateway::{FolderGateway, GatewayResult};
use expediente_core::model::{Document, Folder, FolderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Run `op` until it succeeds, fails non-transiently, or attempts run out
    pub fn run<T, F>(&self, op_name: &str, mut op: F) -> Result<T, ExError>
    where
        F: FnMut() -> Result<T, ExError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        component = module_path!(),
                        op = op_name,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        err.code = err.code(),
                        "transient gateway failure, retrying"
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Gateway decorator applying a `RetryPolicy` to every call
pub struct RetryingGateway<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G: FolderGateway> RetryingGateway<G> {
    pub fn new(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: FolderGateway> FolderGateway for RetryingGateway<G> {
    fn load_folders(&self, root_id: FolderId) -> GatewayResult<Vec<Folder>> {
        self.policy
            .run("load_folders", || self.inner.load_folders(root_id))
    }

    fn load_documents(&self, folder_ids: &[FolderId]) -> GatewayResult<Vec<Document>> {
        self.policy
            .run("load_documents", || self.inner.load_documents(folder_ids))
    }
}

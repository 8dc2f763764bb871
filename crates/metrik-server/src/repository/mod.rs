//! Metric storage backends.
//!
//! The service depends only on the [`Repository`] capability, never on a
//! concrete backend, so durable backends (file, remote) can be swapped in
//! behind the same contract.

pub mod memory;

use async_trait::async_trait;

use metrik_core::error::Result;
use metrik_core::Metric;

pub use memory::InMemoryRepository;

/// Key-value store of metrics by name.
///
/// `store` inserts or overwrites; it never merges. Merge logic (counter
/// accumulation, gauge replacement) lives in the service, not here.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Insert or overwrite the entry for `metric.name`.
    async fn store(&self, metric: Metric) -> Result<()>;

    /// Current value, or `None` when absent. Absence is not an error;
    /// `Err` is reserved for backend failures.
    async fn get(&self, name: &str) -> Result<Option<Metric>>;

    /// Point-in-time copy of all entries, order unspecified. An empty
    /// repository yields an empty vec.
    async fn list(&self) -> Result<Vec<Metric>>;
}

//! Snapshot persistence.
//!
//! A snapshot is the full set of metric entries at one instant; it is the
//! unit of backup/restore. The snapshot encoding (file format, schema) is
//! the backuper's concern — the service treats it as an opaque durable
//! copy of all entries.

pub mod file;
pub mod noop;

use async_trait::async_trait;

use metrik_core::error::Result;
use metrik_core::Metric;

pub use file::FileBackuper;
pub use noop::NoopBackuper;

#[async_trait]
pub trait Backuper: Send + Sync {
    /// Persist a full snapshot, replacing any previous one.
    async fn backup(&self, snapshot: Vec<Metric>) -> Result<()>;

    /// Reconstruct the last persisted snapshot. Returns an empty snapshot
    /// (not an error) when none exists yet.
    async fn restore(&self) -> Result<Vec<Metric>>;
}

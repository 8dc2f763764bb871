use async_trait::async_trait;

use metrik_core::error::Result;
use metrik_core::Metric;

use super::Backuper;

/// Backuper that stores nothing and always succeeds.
///
/// Used when durability is disabled, and as a stand-in for tests.
#[derive(Debug, Default)]
pub struct NoopBackuper;

#[async_trait]
impl Backuper for NoopBackuper {
    async fn backup(&self, _snapshot: Vec<Metric>) -> Result<()> {
        Ok(())
    }

    async fn restore(&self) -> Result<Vec<Metric>> {
        Ok(Vec::new())
    }
}

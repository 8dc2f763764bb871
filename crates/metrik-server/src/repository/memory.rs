use async_trait::async_trait;
use dashmap::DashMap;

use metrik_core::error::Result;
use metrik_core::Metric;

use super::Repository;

/// In-memory repository backed by `DashMap`.
///
/// Entries are replaced whole on `store` and cloned out on reads, so a
/// reader never observes a torn entry (per-entry atomicity; no cross-entry
/// transactional guarantee).
#[derive(Default)]
pub struct InMemoryRepository {
    metrics: DashMap<String, Metric>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            metrics: DashMap::new(),
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn store(&self, metric: Metric) -> Result<()> {
        self.metrics.insert(metric.name.clone(), metric);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<Metric>> {
        Ok(self.metrics.get(name).map(|r| r.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Metric>> {
        Ok(self.metrics.iter().map(|r| r.value().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn store_overwrites_never_merges() {
        let repo = InMemoryRepository::new();
        repo.store(Metric::counter("poll_count", 10)).await.unwrap();
        repo.store(Metric::counter("poll_count", 3)).await.unwrap();

        let got = repo.get("poll_count").await.unwrap();
        assert_eq!(got, Some(Metric::counter("poll_count", 3)));
    }

    #[tokio::test]
    async fn get_absent_is_none_not_error() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_empty_is_empty_vec() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.list().await.unwrap(), Vec::<Metric>::new());
    }
}

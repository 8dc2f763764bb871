//! Metrics service: merge policy and backup coordination.
//!
//! The service owns the accumulate-or-replace rule and is the only
//! component allowed to merge. A single write lock is held across every
//! read-merge-write sequence, so concurrent updates of the same name never
//! lose increments. Reads (`get`, `list`) go straight to the repository.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use metrik_core::error::Result;
use metrik_core::{Metric, MetricValue};

use crate::backup::Backuper;
use crate::config::BackupSection;
use crate::repository::Repository;

/// When the service hands a snapshot to the backuper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupPolicy {
    /// Never back up automatically.
    Disabled,
    /// Back up inside the write path, after each successful mutation.
    EveryWrite,
    /// Back up from a background task on a fixed period.
    Interval(Duration),
}

impl BackupPolicy {
    /// Derive the policy from config: `interval_ms == 0` means synchronous
    /// per-write. The two automatic modes are mutually exclusive.
    pub fn from_section(section: &BackupSection) -> Self {
        if !section.enabled {
            BackupPolicy::Disabled
        } else if section.interval_ms == 0 {
            BackupPolicy::EveryWrite
        } else {
            BackupPolicy::Interval(Duration::from_millis(section.interval_ms))
        }
    }
}

pub struct MetricsService {
    repo: Arc<dyn Repository>,
    backuper: Arc<dyn Backuper>,
    policy: BackupPolicy,
    // Held across every read-merge-write (and any in-path backup), so a
    // snapshot never captures a half-applied batch.
    write_lock: Mutex<()>,
}

impl MetricsService {
    /// Build the service. When backup and restore-on-start are enabled,
    /// the last snapshot is loaded into the repository here, before any
    /// request is served. With an interval policy, a background backup
    /// task is spawned; it stops once the service is dropped.
    pub async fn new(
        repo: Arc<dyn Repository>,
        backuper: Arc<dyn Backuper>,
        section: &BackupSection,
    ) -> Result<Arc<Self>> {
        if section.enabled && section.restore {
            let snapshot = backuper.restore().await?;
            if !snapshot.is_empty() {
                tracing::info!(entries = snapshot.len(), "restoring metrics snapshot");
            }
            for metric in snapshot {
                repo.store(metric).await?;
            }
        }

        let svc = Arc::new(Self {
            repo,
            backuper,
            policy: BackupPolicy::from_section(section),
            write_lock: Mutex::new(()),
        });

        if let BackupPolicy::Interval(period) = svc.policy {
            Self::spawn_backup_loop(Arc::downgrade(&svc), period);
        }

        Ok(svc)
    }

    pub fn policy(&self) -> BackupPolicy {
        self.policy
    }

    /// Apply one measurement and return the merged result.
    ///
    /// Counters accumulate into the stored total; gauges overwrite it. If
    /// the per-write backup fails afterwards, the mutation is NOT rolled
    /// back: the returned `MetrikError::Backup` means "applied but not
    /// durably persisted", and callers should retry with [`backup_now`]
    /// rather than re-issue the measurement (a counter would double-count).
    ///
    /// [`backup_now`]: MetricsService::backup_now
    pub async fn update(&self, metric: Metric) -> Result<Metric> {
        let _guard = self.write_lock.lock().await;
        let merged = self.apply(metric).await?;
        self.backup_after_write().await?;
        Ok(merged)
    }

    /// Apply a batch in input order under one lock acquisition.
    ///
    /// Repeated names coalesce with the same merge rule (counters sum,
    /// gauges keep the last), exactly as if [`update`] were called per
    /// element. Returns one merged metric per distinct name touched, order
    /// unspecified.
    ///
    /// Failure policy is abort-on-first-error: a repository failure stops
    /// the batch, already-applied entries stay applied, and the per-write
    /// backup is skipped.
    ///
    /// [`update`]: MetricsService::update
    pub async fn update_many(&self, metrics: Vec<Metric>) -> Result<Vec<Metric>> {
        let _guard = self.write_lock.lock().await;

        let mut merged_by_name: HashMap<String, Metric> = HashMap::new();
        for metric in metrics {
            let merged = self.apply(metric).await?;
            merged_by_name.insert(merged.name.clone(), merged);
        }

        if !merged_by_name.is_empty() {
            self.backup_after_write().await?;
        }

        Ok(merged_by_name.into_values().collect())
    }

    /// Current value for `name`, or `None` when the metric has never been
    /// updated. Absence is not an error.
    pub async fn get(&self, name: &str) -> Result<Option<Metric>> {
        self.repo.get(name).await
    }

    /// Point-in-time copy of all metrics, order unspecified.
    pub async fn list(&self) -> Result<Vec<Metric>> {
        self.repo.list().await
    }

    /// Snapshot the repository under the write lock and persist it.
    ///
    /// Public so callers can retry durability after a reported backup
    /// failure without re-issuing measurements. Works under any policy.
    pub async fn backup_now(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.backup_locked().await
    }

    // Must be called with the write lock held.
    async fn apply(&self, metric: Metric) -> Result<Metric> {
        let merged = match self.repo.get(&metric.name).await? {
            Some(existing) => merge(&existing, metric),
            None => metric,
        };
        self.repo.store(merged.clone()).await?;
        Ok(merged)
    }

    async fn backup_after_write(&self) -> Result<()> {
        match self.policy {
            BackupPolicy::EveryWrite => self.backup_locked().await,
            _ => Ok(()),
        }
    }

    async fn backup_locked(&self) -> Result<()> {
        let snapshot = self.repo.list().await?;
        self.backuper.backup(snapshot).await
    }

    fn spawn_backup_loop(svc: Weak<Self>, period: Duration) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval() fires immediately; skip that first tick.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(svc) = svc.upgrade() else { break };
                if let Err(e) = svc.backup_now().await {
                    tracing::warn!(
                        code = e.error_code().as_str(),
                        error = %e,
                        "interval backup failed"
                    );
                }
            }
            tracing::debug!("backup loop stopped");
        });
    }
}

/// Merge one incoming measurement into the stored entry.
///
/// Two counters accumulate. Everything else (gauge update, or a kind
/// change for the name) lets the incoming observation win.
fn merge(existing: &Metric, incoming: Metric) -> Metric {
    match (existing.value, incoming.value) {
        // Wrapping add: a counter sitting at i64::MAX must not panic the
        // write path (two's-complement wraparound, as in the usual 64-bit
        // counter semantics).
        (MetricValue::Counter(total), MetricValue::Counter(delta)) => {
            Metric::counter(incoming.name, total.wrapping_add(delta))
        }
        _ => incoming,
    }
}

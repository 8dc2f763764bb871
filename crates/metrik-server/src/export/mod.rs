//! Shipping metrics outward.
//!
//! Exporters read a point-in-time copy from the service and deliver it to
//! an external sink. Cycles are single-flight: an [`ExportGate`] permits at
//! most one running export at a time, and a tick that finds the gate busy
//! is skipped rather than queued.

pub mod gate;
pub mod log;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;

use metrik_core::error::Result;
use metrik_core::Metric;

use crate::service::MetricsService;

pub use gate::{ExportGate, ExportPermit};
pub use log::LogExporter;

/// Delivers a snapshot to an external sink. The slice handed in is a
/// read-only point-in-time copy; exporters must not feed it back into the
/// service.
#[async_trait]
pub trait Exporter: Send + Sync {
    fn name(&self) -> &str;
    async fn export(&self, metrics: Vec<Metric>) -> Result<()>;
}

/// Run one gated export cycle.
///
/// Returns `Ok(false)` when a previous cycle still holds the gate (the
/// cycle is skipped and logged), `Ok(true)` after a delivered export.
pub async fn export_once(
    service: &MetricsService,
    exporter: &dyn Exporter,
    gate: &ExportGate,
) -> Result<bool> {
    let Some(_permit) = gate.try_begin() else {
        tracing::warn!(exporter = exporter.name(), "export cycle still running, skipping tick");
        return Ok(false);
    };

    let metrics = service.list().await?;
    exporter.export(metrics).await?;
    Ok(true)
}

/// Drive an exporter on a fixed period until the task is aborted.
///
/// Each cycle runs in its own task so a slow sink never delays the tick;
/// the shared gate makes any cycle that overlaps a still-running one skip
/// instead of piling up.
pub async fn run_export_loop(
    service: Arc<MetricsService>,
    exporter: Arc<dyn Exporter>,
    period: Duration,
) {
    let gate = Arc::new(ExportGate::new());
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        let service = Arc::clone(&service);
        let exporter = Arc::clone(&exporter);
        let gate = Arc::clone(&gate);
        tokio::spawn(async move {
            if let Err(e) = export_once(&service, exporter.as_ref(), &gate).await {
                tracing::warn!(
                    exporter = exporter.name(),
                    code = e.error_code().as_str(),
                    error = %e,
                    "export cycle failed"
                );
            }
        });
    }
}

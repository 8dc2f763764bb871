#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use metrik_core::error::Result;
use metrik_core::Metric;
use metrik_server::backup::NoopBackuper;
use metrik_server::config::BackupSection;
use metrik_server::export::{export_once, run_export_loop, ExportGate, Exporter};
use metrik_server::repository::InMemoryRepository;
use metrik_server::service::MetricsService;

/// Records every batch it is asked to ship.
#[derive(Default)]
struct RecordingExporter {
    batches: Mutex<Vec<Vec<Metric>>>,
}

#[async_trait]
impl Exporter for RecordingExporter {
    fn name(&self) -> &str {
        "recording"
    }

    async fn export(&self, metrics: Vec<Metric>) -> Result<()> {
        self.batches.lock().unwrap().push(metrics);
        Ok(())
    }
}

async fn new_service() -> Arc<MetricsService> {
    MetricsService::new(
        Arc::new(InMemoryRepository::new()),
        Arc::new(NoopBackuper),
        &BackupSection::default(),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn export_once_ships_current_snapshot() {
    let service = new_service().await;
    service.update(Metric::counter("poll_count", 3)).await.unwrap();

    let exporter = RecordingExporter::default();
    let gate = ExportGate::new();

    let delivered = export_once(&service, &exporter, &gate).await.unwrap();
    assert!(delivered);
    assert!(!gate.is_busy());

    let batches = exporter.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], vec![Metric::counter("poll_count", 3)]);
}

/// Exporter that stalls inside `export` until released.
struct StallingExporter {
    calls: AtomicUsize,
    release: Notify,
}

#[async_trait]
impl Exporter for StallingExporter {
    fn name(&self) -> &str {
        "stalling"
    }

    async fn export(&self, _metrics: Vec<Metric>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn overlapping_cycles_are_skipped_not_queued() {
    let service = new_service().await;
    service.update(Metric::counter("poll_count", 1)).await.unwrap();

    let exporter = Arc::new(StallingExporter {
        calls: AtomicUsize::new(0),
        release: Notify::new(),
    });
    let loop_task = tokio::spawn(run_export_loop(
        Arc::clone(&service),
        Arc::clone(&exporter) as Arc<dyn Exporter>,
        Duration::from_millis(100),
    ));

    // The first tick fires immediately; its cycle stalls in the sink,
    // holding the gate.
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert_eq!(exporter.calls.load(Ordering::SeqCst), 1);

    // Many more ticks while the gate is held: every cycle is skipped, the
    // sink is not re-entered.
    tokio::time::advance(Duration::from_millis(1000)).await;
    tokio::task::yield_now().await;
    assert_eq!(exporter.calls.load(Ordering::SeqCst), 1);

    // Release the stalled cycle; the next tick claims the gate again.
    exporter.release.notify_waiters();
    tokio::time::advance(Duration::from_millis(200)).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    assert!(exporter.calls.load(Ordering::SeqCst) >= 2);

    loop_task.abort();
}

#[tokio::test]
async fn busy_gate_skips_the_cycle() {
    let service = new_service().await;
    let exporter = RecordingExporter::default();
    let gate = ExportGate::new();

    let permit = gate.try_begin().unwrap();
    let delivered = export_once(&service, &exporter, &gate).await.unwrap();
    assert!(!delivered);
    assert!(exporter.batches.lock().unwrap().is_empty());
    drop(permit);

    // Released: the next cycle runs.
    assert!(export_once(&service, &exporter, &gate).await.unwrap());
    assert_eq!(exporter.batches.lock().unwrap().len(), 1);
}

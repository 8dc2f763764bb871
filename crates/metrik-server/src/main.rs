//! metrik server daemon.
//!
//! - Restores the last snapshot on startup (when enabled)
//! - Serves Update/Get/List through `MetricsService`
//! - Persists snapshots synchronously or on an interval, per config
//! - Ships the current values to the log on a fixed period

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use metrik_server::backup::{Backuper, FileBackuper, NoopBackuper};
use metrik_server::config;
use metrik_server::export::{self, LogExporter};
use metrik_server::repository::InMemoryRepository;
use metrik_server::service::MetricsService;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Config (strict parsing + validate)
    let cfg = config::load_from_file("metrik.yaml").expect("config load failed");

    let repo = Arc::new(InMemoryRepository::new());
    let backuper: Arc<dyn Backuper> = if cfg.backup.enabled {
        Arc::new(FileBackuper::new(cfg.backup.path.clone()))
    } else {
        Arc::new(NoopBackuper)
    };

    let service = MetricsService::new(repo, backuper, &cfg.backup)
        .await
        .expect("service init failed");

    let exporter = Arc::new(LogExporter::new("log"));
    let export_task = tokio::spawn(export::run_export_loop(
        Arc::clone(&service),
        exporter,
        Duration::from_millis(cfg.export.interval_ms),
    ));

    tracing::info!(
        backup = cfg.backup.enabled,
        backup_interval_ms = cfg.backup.interval_ms,
        export_interval_ms = cfg.export.interval_ms,
        "metrik-server starting"
    );

    tokio::signal::ctrl_c().await.expect("ctrl_c failed");
    export_task.abort();

    // Final snapshot so nothing accumulated since the last tick is lost.
    if cfg.backup.enabled {
        if let Err(e) = service.backup_now().await {
            tracing::warn!(error = %e, "final backup failed");
        }
    }
    tracing::info!("metrik-server stopped");
}

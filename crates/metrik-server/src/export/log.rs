use async_trait::async_trait;

use metrik_core::error::Result;
use metrik_core::Metric;

use super::Exporter;

/// Exporter that writes every metric to the structured log, one line per
/// entry: `name:value (kind)`.
pub struct LogExporter {
    name: String,
}

impl LogExporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Exporter for LogExporter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn export(&self, metrics: Vec<Metric>) -> Result<()> {
        for metric in &metrics {
            tracing::info!(
                exporter = %self.name,
                "{}:{} ({})",
                metric.name,
                metric.value_string(),
                metric.kind().as_str()
            );
        }
        Ok(())
    }
}

use serde::Deserialize;

use metrik_core::error::{MetrikError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub backup: BackupSection,

    #[serde(default)]
    pub export: ExportSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetrikError::UnsupportedVersion);
        }

        self.backup.validate()?;
        self.export.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackupSection {
    #[serde(default)]
    pub enabled: bool,

    /// Milliseconds between snapshots; zero means synchronous per write.
    #[serde(default)]
    pub interval_ms: u64,

    /// Restore the last snapshot into the repository on startup.
    #[serde(default = "default_restore")]
    pub restore: bool,

    #[serde(default = "default_backup_path")]
    pub path: String,
}

impl Default for BackupSection {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 0,
            restore: default_restore(),
            path: default_backup_path(),
        }
    }
}

impl BackupSection {
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms != 0 && !(1000..=3_600_000).contains(&self.interval_ms) {
            return Err(MetrikError::Config(
                "backup.interval_ms must be 0 (synchronous) or between 1000 and 3600000".into(),
            ));
        }
        if self.enabled && self.path.is_empty() {
            return Err(MetrikError::Config(
                "backup.path must not be empty when backup is enabled".into(),
            ));
        }
        Ok(())
    }
}

fn default_restore() -> bool {
    true
}
fn default_backup_path() -> String {
    "metrik-backup.json".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSection {
    #[serde(default = "default_export_interval_ms")]
    pub interval_ms: u64,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            interval_ms: default_export_interval_ms(),
        }
    }
}

impl ExportSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=600_000).contains(&self.interval_ms) {
            return Err(MetrikError::Config(
                "export.interval_ms must be between 100 and 600000".into(),
            ));
        }
        Ok(())
    }
}

fn default_export_interval_ms() -> u64 {
    10_000
}

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use metrik_core::error::{MetrikError, Result};
use metrik_core::Metric;

use super::Backuper;

/// Backuper persisting snapshots as a JSON file.
///
/// Writes go to a sibling temp path first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
pub struct FileBackuper {
    path: PathBuf,
}

impl FileBackuper {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut p = self.path.as_os_str().to_owned();
        p.push(".tmp");
        PathBuf::from(p)
    }
}

#[async_trait]
impl Backuper for FileBackuper {
    async fn backup(&self, snapshot: Vec<Metric>) -> Result<()> {
        let data = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| MetrikError::Backup(format!("encode snapshot failed: {e}")))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, data)
            .await
            .map_err(|e| MetrikError::Backup(format!("write {} failed: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            MetrikError::Backup(format!("rename into {} failed: {e}", self.path.display()))
        })?;
        Ok(())
    }

    async fn restore(&self) -> Result<Vec<Metric>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            // No snapshot yet: empty repository, not a failure.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(MetrikError::Backup(format!(
                    "read {} failed: {e}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_slice(&data)
            .map_err(|e| MetrikError::Backup(format!("decode snapshot failed: {e}")))
    }
}

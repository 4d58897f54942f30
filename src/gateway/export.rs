use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::Config;
use crate::error::{DeskError, Result};

pub const LEGACY_FILE_NAME: &str = "schedule.pdf";

/// Where exported schedule documents are written
#[derive(Debug, Clone)]
pub struct ExportSink {
    dir: PathBuf,
    legacy_filename: bool,
}

impl ExportSink {
    pub fn new(dir: impl Into<PathBuf>, legacy_filename: bool) -> Self {
        Self {
            dir: dir.into(),
            legacy_filename,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let dir = config
            .export
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir, config.export.legacy_filename)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `schedule-<id>.pdf`, with characters outside `[A-Za-z0-9_-]` replaced by `_`
    pub fn file_name(&self, id: &str) -> String {
        if self.legacy_filename {
            return LEGACY_FILE_NAME.to_string();
        }
        let safe: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("schedule-{safe}.pdf")
    }

    pub async fn save(&self, id: &str, bytes: &[u8]) -> Result<PathBuf> {
        if bytes.is_empty() {
            return Err(DeskError::MalformedResponse(format!(
                "export of schedule '{id}' returned an empty document"
            )));
        }

        fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(self.file_name(id));
        fs::write(&path, bytes).await.map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write export at {}: {}", path.display(), e),
            ))
        })?;
        tracing::info!("exported schedule {id} to {}", path.display());
        Ok(path)
    }
}

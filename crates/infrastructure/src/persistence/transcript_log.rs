//! Transcript log - Append-only NDJSON, one file per day

use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::TranscriptPort};
use async_trait::async_trait;
use chrono::Utc;
use domain::TranscriptEntry;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Appends transcript entries to `<dir>/YYYY-MM-DD.log`
#[derive(Debug, Clone)]
pub struct NdjsonTranscriptLog {
    dir: PathBuf,
}

impl NdjsonTranscriptLog {
    /// Create a log writing into the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of today's log file
    pub fn today_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.log", Utc::now().format("%Y-%m-%d")))
    }

    /// Directory the log writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl TranscriptPort for NdjsonTranscriptLog {
    #[instrument(skip(self, entry))]
    async fn append(&self, entry: &TranscriptEntry) -> Result<(), ApplicationError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            ApplicationError::Storage(format!("Failed to create {}: {e}", self.dir.display()))
        })?;

        let mut line = serde_json::to_string(entry)
            .map_err(|e| ApplicationError::Storage(format!("Failed to encode entry: {e}")))?;
        line.push('\n');

        let path = self.today_path();
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| {
                ApplicationError::Storage(format!("Failed to open {}: {e}", path.display()))
            })?;

        file.write_all(line.as_bytes()).await.map_err(|e| {
            ApplicationError::Storage(format!("Failed to write {}: {e}", path.display()))
        })?;
        file.flush().await.map_err(|e| {
            ApplicationError::Storage(format!("Failed to flush {}: {e}", path.display()))
        })?;

        debug!(path = %path.display(), "Appended transcript entry");
        Ok(())
    }
}

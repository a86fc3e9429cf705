//! Transcript port - Append-only chat log

use async_trait::async_trait;
use domain::TranscriptEntry;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the append-only transcript log
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptPort: Send + Sync {
    /// Append one exchange to the log
    async fn append(&self, entry: &TranscriptEntry) -> Result<(), ApplicationError>;
}

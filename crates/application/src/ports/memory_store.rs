//! Memory store port - Persistence for the flat list of notes

use async_trait::async_trait;
use domain::MemoryNote;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for memory note persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MemoryStorePort: Send + Sync {
    /// All saved notes, oldest first
    async fn list(&self) -> Result<Vec<MemoryNote>, ApplicationError>;

    /// Append one note
    async fn append(&self, note: &MemoryNote) -> Result<(), ApplicationError>;

    /// Delete every note
    async fn clear(&self) -> Result<(), ApplicationError>;
}

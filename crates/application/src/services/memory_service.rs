//! Memory service - The companion's flat list of notes

use std::{fmt, sync::Arc};

use domain::{MemoryNote, wants_remembering};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::MemoryStorePort};

/// Service for saving and recalling notes
pub struct MemoryService {
    store: Arc<dyn MemoryStorePort>,
}

impl fmt::Debug for MemoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryService").finish_non_exhaustive()
    }
}

impl MemoryService {
    /// Create a new memory service
    pub fn new(store: Arc<dyn MemoryStorePort>) -> Self {
        Self { store }
    }

    /// All saved notes, oldest first
    pub async fn list(&self) -> Result<Vec<MemoryNote>, ApplicationError> {
        self.store.list().await
    }

    /// Save a note verbatim
    #[instrument(skip(self, text))]
    pub async fn remember(&self, text: &str) -> Result<MemoryNote, ApplicationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApplicationError::Storage(
                "Cannot save an empty note".to_string(),
            ));
        }

        let note = MemoryNote::new(text);
        self.store.append(&note).await?;
        debug!("Saved memory note");
        Ok(note)
    }

    /// Delete all notes
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApplicationError> {
        self.store.clear().await
    }

    /// Auto-capture: save the user sentence when it explicitly asks to be
    /// remembered. Returns the saved note, if any.
    #[instrument(skip(self, user_text))]
    pub async fn capture(&self, user_text: &str) -> Result<Option<MemoryNote>, ApplicationError> {
        if !wants_remembering(user_text) {
            return Ok(None);
        }
        self.remember(user_text).await.map(Some)
    }

    /// Render notes the way the REPL prints them
    pub fn format_listing(notes: &[MemoryNote]) -> String {
        if notes.is_empty() {
            return "No saved memories yet. Use /remember <note> to add one.".to_string();
        }

        let lines: Vec<&str> = notes.iter().map(|n| n.text.as_str()).collect();
        format!("Memories:\n- {}", lines.join("\n- "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockMemoryStorePort;

    #[tokio::test]
    async fn remember_appends_to_store() {
        let mut mock = MockMemoryStorePort::new();
        mock.expect_append()
            .withf(|note| note.text == "the hatch sticks")
            .times(1)
            .returning(|_| Ok(()));

        let service = MemoryService::new(Arc::new(mock));
        let note = service.remember("  the hatch sticks  ").await.unwrap();
        assert_eq!(note.text, "the hatch sticks");
    }

    #[tokio::test]
    async fn remember_rejects_empty_note() {
        let service = MemoryService::new(Arc::new(MockMemoryStorePort::new()));
        assert!(service.remember("   ").await.is_err());
    }

    #[tokio::test]
    async fn capture_saves_explicit_requests() {
        let mut mock = MockMemoryStorePort::new();
        mock.expect_append().times(1).returning(|_| Ok(()));

        let service = MemoryService::new(Arc::new(mock));
        let saved = service
            .capture("please remember that I sleep at 22:00")
            .await
            .unwrap();
        assert!(saved.is_some());
    }

    #[tokio::test]
    async fn capture_ignores_plain_chat() {
        let service = MemoryService::new(Arc::new(MockMemoryStorePort::new()));
        let saved = service.capture("how are you today?").await.unwrap();
        assert!(saved.is_none());
    }

    #[tokio::test]
    async fn clear_passes_through() {
        let mut mock = MockMemoryStorePort::new();
        mock.expect_clear().times(1).returning(|| Ok(()));

        let service = MemoryService::new(Arc::new(mock));
        assert!(service.clear().await.is_ok());
    }

    #[test]
    fn listing_empty_store() {
        let listing = MemoryService::format_listing(&[]);
        assert!(listing.contains("No saved memories yet"));
        assert!(listing.contains("/remember"));
    }

    #[test]
    fn listing_bullets_every_note() {
        let notes = vec![MemoryNote::new("likes jazz"), MemoryNote::new("hates 6am calls")];
        let listing = MemoryService::format_listing(&notes);
        assert_eq!(listing, "Memories:\n- likes jazz\n- hates 6am calls");
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let mut mock = MockMemoryStorePort::new();
        mock.expect_list()
            .returning(|| Err(ApplicationError::Storage("corrupt".to_string())));

        let service = MemoryService::new(Arc::new(mock));
        assert!(service.list().await.is_err());
    }
}

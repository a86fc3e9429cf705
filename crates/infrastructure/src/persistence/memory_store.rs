//! Memory note store - JSON array file with atomic rewrites

use std::path::PathBuf;

use application::{error::ApplicationError, ports::MemoryStorePort};
use async_trait::async_trait;
use domain::MemoryNote;
use tracing::{debug, instrument, warn};

/// Persists memory notes as one JSON array file.
///
/// Reads are forgiving (a missing or corrupt file is an empty list, the
/// loop must not die over a bad notes file); writes go through a temp file
/// in the same directory followed by a rename.
#[derive(Debug, Clone)]
pub struct JsonMemoryStore {
    path: PathBuf,
}

impl JsonMemoryStore {
    /// Create a store reading and writing the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Vec<MemoryNote> {
        let Ok(text) = tokio::fs::read_to_string(&self.path).await else {
            return Vec::new();
        };

        match serde_json::from_str(&text) {
            Ok(notes) => notes,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt memories file, starting empty");
                Vec::new()
            },
        }
    }

    async fn write_all(&self, notes: &[MemoryNote]) -> Result<(), ApplicationError> {
        let parent = self.path.parent().map(std::path::Path::to_path_buf);

        if let Some(ref dir) = parent {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await.map_err(|e| {
                    ApplicationError::Storage(format!("Failed to create {}: {e}", dir.display()))
                })?;
            }
        }

        let json = serde_json::to_vec_pretty(notes)
            .map_err(|e| ApplicationError::Storage(format!("Failed to encode notes: {e}")))?;

        // Write-then-rename so a crash mid-write cannot truncate the file
        let dir = parent.unwrap_or_else(|| PathBuf::from("."));
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), String> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)
                .map_err(|e| format!("Failed to create temp file: {e}"))?;
            std::io::Write::write_all(&mut tmp, &json)
                .map_err(|e| format!("Failed to write notes: {e}"))?;
            tmp.persist(&path)
                .map_err(|e| format!("Failed to replace {}: {e}", path.display()))?;
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("Write task failed: {e}")))?
        .map_err(ApplicationError::Storage)?;

        debug!(count = notes.len(), "Wrote memories file");
        Ok(())
    }
}

#[async_trait]
impl MemoryStorePort for JsonMemoryStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<MemoryNote>, ApplicationError> {
        Ok(self.read_all().await)
    }

    #[instrument(skip(self, note))]
    async fn append(&self, note: &MemoryNote) -> Result<(), ApplicationError> {
        let mut notes = self.read_all().await;
        notes.push(note.clone());
        self.write_all(&notes).await
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<(), ApplicationError> {
        self.write_all(&[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonMemoryStore {
        JsonMemoryStore::new(dir.path().join("memories.json"))
    }

    #[tokio::test]
    async fn missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_then_list_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append(&MemoryNote::new("likes jazz")).await.unwrap();
        store.append(&MemoryNote::new("hates 6am calls")).await.unwrap();

        let notes = store.list().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "likes jazz");
        assert_eq!(notes[1].text, "hates 6am calls");
    }

    #[tokio::test]
    async fn clear_empties_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append(&MemoryNote::new("note")).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        // The file itself still exists and holds an empty array
        let text = tokio::fs::read_to_string(dir.path().join("memories.json"))
            .await
            .unwrap();
        assert_eq!(text.trim(), "[]");
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memories.json");
        tokio::fs::write(&path, "{{ not json").await.unwrap();

        let store = JsonMemoryStore::new(&path);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonMemoryStore::new(dir.path().join("nested/storage/memories.json"));

        store.append(&MemoryNote::new("note")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn file_is_valid_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(&MemoryNote::new("note")).await.unwrap();

        let text = tokio::fs::read_to_string(dir.path().join("memories.json"))
            .await
            .unwrap();
        let parsed: Vec<MemoryNote> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}

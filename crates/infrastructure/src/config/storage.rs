//! File storage locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the persisted files live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Persona profile (JSON)
    #[serde(default = "default_persona_path")]
    pub persona_path: PathBuf,

    /// Memory notes (JSON array)
    #[serde(default = "default_memories_path")]
    pub memories_path: PathBuf,

    /// Directory for the daily NDJSON transcript files
    #[serde(default = "default_transcript_dir")]
    pub transcript_dir: PathBuf,
}

fn default_persona_path() -> PathBuf {
    PathBuf::from("persona/astronaut.json")
}

fn default_memories_path() -> PathBuf {
    PathBuf::from("storage/memories.json")
}

fn default_transcript_dir() -> PathBuf {
    PathBuf::from("chat_history")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persona_path: default_persona_path(),
            memories_path: default_memories_path(),
            transcript_dir: default_transcript_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_match_layout() {
        let config = StorageConfig::default();
        assert_eq!(config.persona_path, PathBuf::from("persona/astronaut.json"));
        assert_eq!(config.memories_path, PathBuf::from("storage/memories.json"));
        assert_eq!(config.transcript_dir, PathBuf::from("chat_history"));
    }
}

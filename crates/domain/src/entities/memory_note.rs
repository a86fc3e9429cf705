//! Memory note entity - Flat free-text notes the companion keeps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single free-text note saved for future conversations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryNote {
    /// Note text, stored verbatim
    pub text: String,
    /// When the note was saved
    pub created_at: DateTime<Utc>,
}

impl MemoryNote {
    /// Create a new note from user text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// Heuristic for auto-capturing notes: a user sentence that explicitly asks
/// to be remembered ("remember that ...", "note that ...") is saved verbatim.
pub fn wants_remembering(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("remember that") || lower.contains("note that")
}

//! Transcript entry - One exchange in the append-only chat log

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single user/assistant exchange, written as one NDJSON line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// RFC 3339 timestamp, second precision
    pub ts: String,
    /// What the user said
    pub user: String,
    /// The companion's final reply
    pub assistant: String,
}

impl TranscriptEntry {
    /// Create an entry stamped with the current time
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

//! Speech port - Interface for spoken replies

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Synthesized audio handed back to callers that serve it (the web demo)
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Encoded audio bytes
    pub audio: Vec<u8>,
    /// MIME type of the audio bytes
    pub mime_type: String,
}

/// Port for speech synthesis and playback
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Speak text through the local speakers
    async fn speak(&self, text: &str) -> Result<(), ApplicationError>;

    /// Synthesize text to audio bytes without playing
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, ApplicationError>;

    /// Check if the speech backend is usable
    async fn is_available(&self) -> bool;

    /// Human-readable description of the active voice
    fn voice_description(&self) -> String;
}

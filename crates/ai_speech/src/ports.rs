//! Port definitions for speech synthesis

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, VoiceInfo};

/// Port for Text-to-Speech implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to audio without playing it
    ///
    /// # Arguments
    ///
    /// * `text` - Text to synthesize
    /// * `voice` - Optional voice ID (provider default when `None`)
    async fn synthesize(&self, text: &str, voice: Option<&str>)
    -> Result<AudioData, SpeechError>;

    /// Speak text through the speakers (synthesize-and-play convenience)
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;

    /// List voices this provider can use
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;

    /// Check if the provider's tool or service is usable
    async fn is_available(&self) -> bool;

    /// The voice used when none is specified
    fn default_voice(&self) -> &str;

    /// Human-readable description of the active voice configuration
    fn voice_description(&self) -> String;
}

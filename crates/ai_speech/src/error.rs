//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to a speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to a speech service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Playback failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Probing or preparing a reference recording failed
    #[error("Audio analysis failed: {0}")]
    AnalysisFailed(String),

    /// Invalid response from a speech service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during processing
    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Voice not found
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Required tool or service is not installed/configured
    #[error("Provider not available: {0}")]
    NotAvailable(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30_000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

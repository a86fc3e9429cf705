//! Inference errors

use thiserror::Error;

/// Errors that can occur while talking to the inference server
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Server returned a non-success status
    #[error("Server error: {0}")]
    ServerError(String),

    /// Error while reading the streaming response
    #[error("Stream error: {0}")]
    StreamError(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(crate::config::default_timeout_ms())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

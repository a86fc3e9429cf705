//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/model error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External service error (model server, speech service)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Persistence error (persona, memories, transcript)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is worth retrying
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}

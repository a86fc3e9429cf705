//! Inference port - Interface for the language-model backend

use std::pin::Pin;

use async_trait::async_trait;
use domain::Conversation;
use futures::Stream;

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if the backend reports it)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// A piece of a streamed reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingChunk {
    /// Content delta
    pub content: String,
    /// Whether this is the final chunk
    pub done: bool,
}

/// Stream of reply chunks
pub type InferenceStream =
    Pin<Box<dyn Stream<Item = Result<StreamingChunk, ApplicationError>> + Send>>;

/// Port for inference operations
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a response for a single message
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError>;

    /// Generate a response with a specific system prompt
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<InferenceResult, ApplicationError>;

    /// Generate a response within a conversation context
    async fn generate_with_context(
        &self,
        conversation: &Conversation,
    ) -> Result<InferenceResult, ApplicationError>;

    /// Stream a response within a conversation context
    async fn generate_stream_with_context(
        &self,
        conversation: &Conversation,
    ) -> Result<InferenceStream, ApplicationError>;

    /// Check if the inference backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Name of the current model
    fn current_model(&self) -> String;

    /// List models available on the backend
    async fn list_available_models(&self) -> Result<Vec<String>, ApplicationError>;
}

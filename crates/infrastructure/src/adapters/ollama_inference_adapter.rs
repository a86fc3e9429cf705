//! Ollama inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{
    InferenceConfig, InferenceEngine, InferenceMessage, InferenceRequest, OllamaInferenceEngine,
};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult, InferenceStream, StreamingChunk},
};
use async_trait::async_trait;
use domain::Conversation;
use futures::StreamExt;
use tracing::{debug, instrument};

/// Adapter for Ollama-compatible inference servers
#[derive(Debug)]
pub struct OllamaInferenceAdapter {
    engine: OllamaInferenceEngine,
}

impl OllamaInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OllamaInferenceEngine::new(config)
            .map_err(|e| ApplicationError::Inference(e.to_string()))?;

        Ok(Self { engine })
    }

    /// Convert ai_core errors to application errors
    fn map_error(e: ai_core::InferenceError) -> ApplicationError {
        match e {
            ai_core::InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Model server unreachable: {msg}"))
            },
            ai_core::InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Inference timeout after {ms}ms"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }

    /// Build the wire messages for a conversation, system prompt first
    fn conversation_messages(conversation: &Conversation) -> Vec<InferenceMessage> {
        let mut messages = Vec::with_capacity(conversation.message_count() + 1);

        if let Some(system) = conversation.system_prompt.as_ref() {
            messages.push(InferenceMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }

        messages.extend(conversation.messages.iter().map(InferenceMessage::from));

        messages
    }

    fn to_result(response: ai_core::InferenceResponse, start: Instant) -> InferenceResult {
        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms,
            "Inference completed"
        );

        InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        }
    }
}

#[async_trait]
impl InferencePort for OllamaInferenceAdapter {
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();
        let response = self
            .engine
            .generate(InferenceRequest::simple(message))
            .await
            .map_err(Self::map_error)?;
        Ok(Self::to_result(response, start))
    }

    #[instrument(skip(self, system_prompt, message), fields(message_len = message.len()))]
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();
        let response = self
            .engine
            .generate(InferenceRequest::with_system(system_prompt, message))
            .await
            .map_err(Self::map_error)?;
        Ok(Self::to_result(response, start))
    }

    #[instrument(skip(self, conversation), fields(conv_id = %conversation.id))]
    async fn generate_with_context(
        &self,
        conversation: &Conversation,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();
        let request = InferenceRequest::from_messages(Self::conversation_messages(conversation));
        let response = self.engine.generate(request).await.map_err(Self::map_error)?;
        Ok(Self::to_result(response, start))
    }

    #[instrument(skip(self, conversation), fields(conv_id = %conversation.id))]
    async fn generate_stream_with_context(
        &self,
        conversation: &Conversation,
    ) -> Result<InferenceStream, ApplicationError> {
        let request =
            InferenceRequest::from_messages(Self::conversation_messages(conversation)).streaming();

        let stream = self
            .engine
            .generate_stream(request)
            .await
            .map_err(Self::map_error)?;

        let mapped = stream.map(|item| {
            item.map(|chunk| StreamingChunk {
                content: chunk.content,
                done: chunk.done,
            })
            .map_err(Self::map_error)
        });

        Ok(Box::pin(mapped))
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }

    async fn list_available_models(&self) -> Result<Vec<String>, ApplicationError> {
        self.engine.list_models().await.map_err(Self::map_error)
    }
}

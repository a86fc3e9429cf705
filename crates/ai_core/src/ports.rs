//! Port definitions for the inference client

use std::pin::Pin;

use async_trait::async_trait;
use domain::ChatMessage;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// A message in the inference request (chat API wire format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceMessage {
    pub role: String,
    pub content: String,
}

impl From<&ChatMessage> for InferenceMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }
}

/// Request for inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Messages in the conversation, oldest first
    pub messages: Vec<InferenceMessage>,
    /// Model to use (overrides the config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
}

impl InferenceRequest {
    /// Create a single-turn request
    pub fn simple(user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![InferenceMessage {
                role: "user".to_string(),
                content: user_message.into(),
            }],
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
        }
    }

    /// Create a request with a system prompt and one user turn
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![
                InferenceMessage {
                    role: "system".to_string(),
                    content: system.into(),
                },
                InferenceMessage {
                    role: "user".to_string(),
                    content: user.into(),
                },
            ],
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
        }
    }

    /// Create a request from prepared messages
    pub fn from_messages(messages: Vec<InferenceMessage>) -> Self {
        Self {
            messages,
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
        }
    }

    /// Enable streaming for this request
    #[must_use]
    pub const fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    /// Override the model for this request
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the token budget for this request
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics, when the server reports them
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A chunk of a streaming response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingChunk {
    /// Content delta
    pub content: String,
    /// Whether this is the final chunk
    pub done: bool,
    /// Model name (reported on the final chunk)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Type alias for a streaming response
pub type StreamingResponse =
    Pin<Box<dyn Stream<Item = Result<StreamingChunk, InferenceError>> + Send>>;

/// Port for inference client implementations
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a complete response (non-streaming)
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError>;

    /// Generate a streaming response
    async fn generate_stream(
        &self,
        request: InferenceRequest,
    ) -> Result<StreamingResponse, InferenceError>;

    /// Check if the inference server is reachable and serving
    async fn health_check(&self) -> Result<bool, InferenceError>;

    /// List available models
    async fn list_models(&self) -> Result<Vec<String>, InferenceError>;

    /// Get the configured default model
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_request_has_one_user_turn() {
        let req = InferenceRequest::simple("Hello");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert!(!req.stream);
    }

    #[test]
    fn with_system_prepends_system_turn() {
        let req = InferenceRequest::with_system("You are Maitre", "Hi");
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[1].role, "user");
    }

    #[test]
    fn from_messages_keeps_order() {
        let messages = vec![
            InferenceMessage {
                role: "system".to_string(),
                content: "s".to_string(),
            },
            InferenceMessage {
                role: "assistant".to_string(),
                content: "greeting".to_string(),
            },
            InferenceMessage {
                role: "user".to_string(),
                content: "u".to_string(),
            },
        ];
        let req = InferenceRequest::from_messages(messages);
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[1].role, "assistant");
    }

    #[test]
    fn builder_chaining() {
        let req = InferenceRequest::simple("Test")
            .with_model("llama3.1:8b")
            .with_max_tokens(80)
            .streaming();
        assert_eq!(req.model.as_deref(), Some("llama3.1:8b"));
        assert_eq!(req.max_tokens, Some(80));
        assert!(req.stream);
    }

    #[test]
    fn inference_message_from_chat_message() {
        let msg = ChatMessage::assistant("Reply");
        let wire = InferenceMessage::from(&msg);
        assert_eq!(wire.role, "assistant");
        assert_eq!(wire.content, "Reply");
    }

    #[test]
    fn skip_none_fields_in_serialization() {
        let json = serde_json::to_string(&InferenceRequest::simple("Test")).unwrap();
        assert!(!json.contains("model"));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn streaming_chunk_final_carries_model() {
        let chunk = StreamingChunk {
            content: String::new(),
            done: true,
            model: Some("llama3.1:8b".to_string()),
        };
        let json = serde_json::to_string(&chunk).unwrap();
        assert!(json.contains("llama3.1:8b"));
    }
}

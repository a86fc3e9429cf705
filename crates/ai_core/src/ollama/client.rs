//! HTTP client for the Ollama chat API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{
    InferenceEngine, InferenceRequest, InferenceResponse, StreamingResponse, TokenUsage,
};

use super::streaming::create_stream;

/// Inference client for Ollama-compatible servers
#[derive(Debug)]
pub struct OllamaInferenceEngine {
    client: Client,
    config: InferenceConfig,
}

impl OllamaInferenceEngine {
    /// Create a new client from configuration
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized inference client"
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}",
            self.config.base_url,
            endpoint.trim_start_matches('/')
        )
    }

    /// Model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    fn build_chat_request(&self, request: &InferenceRequest, stream: bool) -> ChatRequestBody {
        ChatRequestBody {
            model: self.resolve_model(request).to_string(),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.clone(),
                    content: m.content.clone(),
                })
                .collect(),
            stream,
            options: ChatOptions {
                temperature: request.temperature.unwrap_or(self.config.temperature),
                num_predict: request.max_tokens.unwrap_or(self.config.max_tokens),
                top_p: self.config.top_p,
            },
        }
    }

    async fn post_chat(&self, body: &ChatRequestBody) -> Result<reqwest::Response, InferenceError> {
        let response = self.client.post(self.api_url("chat")).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Inference request failed");
            return Err(InferenceError::ServerError(format!(
                "Status {status}: {text}"
            )));
        }

        Ok(response)
    }
}

/// Chat request wire format
#[derive(Debug, Serialize)]
struct ChatRequestBody {
    model: String,
    messages: Vec<WireMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
}

/// Chat response wire format (non-streaming)
#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    model: String,
    message: WireResponseMessage,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: String,
}

/// Models list wire format
#[derive(Debug, Deserialize)]
struct ModelsResponseBody {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

#[async_trait]
impl InferenceEngine for OllamaInferenceEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let body = self.build_chat_request(&request, false);

        debug!("Sending chat request");

        let response = self.post_chat(&body).await?;

        let parsed: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let usage = match (parsed.prompt_eval_count, parsed.eval_count) {
            (Some(prompt), Some(completion)) => Some(TokenUsage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: prompt + completion,
            }),
            _ => None,
        };

        debug!(tokens = ?usage, "Inference completed");

        Ok(InferenceResponse {
            content: parsed.message.content,
            model: parsed.model,
            usage,
        })
    }

    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn generate_stream(
        &self,
        request: InferenceRequest,
    ) -> Result<StreamingResponse, InferenceError> {
        let body = self.build_chat_request(&request, true);

        debug!("Starting streaming chat request");

        let response = self.post_chat(&body).await?;

        Ok(create_stream(response))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(self.api_url("tags"))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let response = self.client.get(self.api_url("tags")).send().await?;

        if !response.status().is_success() {
            return Err(InferenceError::ServerError(response.status().to_string()));
        }

        let parsed: ModelsResponseBody = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_urls_are_rooted_at_base() {
        let engine = OllamaInferenceEngine::new(InferenceConfig::default()).unwrap();
        assert_eq!(engine.api_url("chat"), "http://localhost:11434/api/chat");
        assert_eq!(engine.api_url("/tags"), "http://localhost:11434/api/tags");
    }

    #[test]
    fn default_model_comes_from_config() {
        let engine = OllamaInferenceEngine::new(InferenceConfig::default()).unwrap();
        assert_eq!(engine.default_model(), "llama3.1:8b");
    }

    #[test]
    fn request_model_overrides_default() {
        let engine = OllamaInferenceEngine::new(InferenceConfig::default()).unwrap();
        let request = InferenceRequest::simple("hi").with_model("qwen2.5:3b");
        assert_eq!(engine.resolve_model(&request), "qwen2.5:3b");
    }

    #[test]
    fn chat_body_carries_sampling_options() {
        let engine = OllamaInferenceEngine::new(InferenceConfig::default()).unwrap();
        let body = engine.build_chat_request(&InferenceRequest::simple("hi"), false);
        assert!((body.options.temperature - 0.7).abs() < 0.01);
        assert_eq!(body.options.num_predict, 2048);
        assert!((body.options.top_p - 0.9).abs() < 0.01);
        assert!(!body.stream);
    }

    #[test]
    fn quick_reply_budget_lands_in_options() {
        let engine = OllamaInferenceEngine::new(InferenceConfig::quick_reply()).unwrap();
        let body = engine.build_chat_request(&InferenceRequest::simple("hi"), true);
        assert_eq!(body.options.num_predict, 80);
        assert!(body.stream);
    }
}

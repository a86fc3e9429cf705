//! Chat handlers

use std::{convert::Infallible, time::Duration};

use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use domain::Conversation;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Companion reply
    pub message: String,
    /// Model used
    pub model: String,
    /// Tokens used (if reported)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

fn conversation_for(state: &AppState, message: &str) -> Conversation {
    let mut conversation = Conversation::with_system_prompt(state.persona.system_prompt());
    conversation.add_user_message(message);
    conversation
}

/// Handle a chat request
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".to_string()));
    }

    let conversation = conversation_for(&state, &request.message);
    let response = state
        .chat_service
        .continue_conversation(&conversation)
        .await?;

    let metadata = response.metadata.as_ref();

    Ok(Json(ChatResponse {
        message: response.content,
        model: metadata.and_then(|m| m.model.clone()).unwrap_or_default(),
        tokens: metadata.and_then(|m| m.tokens),
        latency_ms: metadata.and_then(|m| m.latency_ms).unwrap_or(0),
    }))
}

/// Handle a streaming chat request via SSE
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".to_string()));
    }

    let conversation = conversation_for(&state, &request.message);
    let stream = state.chat_service.stream_conversation(&conversation).await?;

    let events = stream.map(|item| {
        let payload = match item {
            Ok(chunk) => serde_json::json!({
                "content": chunk.content,
                "done": chunk.done,
            }),
            Err(e) => serde_json::json!({
                "error": e.to_string(),
                "done": true,
            }),
        };
        Ok::<_, Infallible>(Event::default().data(payload.to_string()))
    });

    Ok(Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

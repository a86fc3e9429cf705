//! Health endpoints

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::instrument;

use crate::state::AppState;

/// Liveness: the process is up
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness: the inference backend answers
#[instrument(skip(state))]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let inference_healthy = state.chat_service.is_healthy().await;

    let status = if inference_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if inference_healthy { "ready" } else { "degraded" },
        "inference": inference_healthy,
        "model": state.chat_service.current_model(),
        "synthesis": state.tts.is_some(),
    });

    (status, Json(body))
}

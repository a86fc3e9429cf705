//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Synthesis demo
        .route("/", get(handlers::synthesize::index))
        .route("/synthesize", post(handlers::synthesize::synthesize))
        // Chat API (v1)
        .route("/v1/chat", post(handlers::chat::chat))
        .route("/v1/chat/stream", post(handlers::chat::chat_stream))
        // Health and status
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Attach state
        .with_state(state)
}

//! Maitre HTTP presentation layer
//!
//! The web demo: a synthesis form backed by the cloud TTS provider, plus a
//! small JSON chat API with SSE streaming.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

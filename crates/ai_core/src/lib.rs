//! AI Core - Client for Ollama-compatible inference servers
//!
//! Talks to a locally hosted model server (standard Ollama or any server
//! exposing the same chat API) with optional newline-delimited JSON
//! streaming.

pub mod config;
pub mod error;
pub mod ollama;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use ollama::OllamaInferenceEngine;
pub use ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, StreamingChunk,
    StreamingResponse, TokenUsage,
};

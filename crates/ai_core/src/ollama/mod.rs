//! Ollama-compatible inference client
//!
//! Works against any server exposing the Ollama chat API: `/api/chat` for
//! (streaming) generation and `/api/tags` for model discovery.

mod client;
mod streaming;

pub use client::OllamaInferenceEngine;

//! Infrastructure layer - Adapters, configuration and persistence
//!
//! Implements the application ports against the real world: the inference
//! server, the speech providers, and the three flat files this system
//! persists (persona profile, memory notes, chat transcript).

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::{OllamaInferenceAdapter, SpeechAdapter};
pub use config::{AppConfig, ServerConfig, StorageConfig};
pub use persistence::{JsonMemoryStore, JsonPersonaStore, NdjsonTranscriptLog};
pub use telemetry::init_tracing;

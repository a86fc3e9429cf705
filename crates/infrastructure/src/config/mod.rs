//! Application configuration
//!
//! One `config.toml` with sections per concern:
//! - `[server]`: HTTP demo server settings
//! - `[inference]`: model server client (ai_core)
//! - `[speech]`: voice provider selection (ai_speech)
//! - `[storage]`: where the persona, notes and transcript live
//!
//! Environment variables under the `MAITRE_` prefix override file values
//! (`MAITRE_INFERENCE__BASE_URL`, `MAITRE_SPEECH__VOICE`, ...).

mod server;
mod storage;

use std::path::Path;

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Inference client configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// File storage locations
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` and `MAITRE_` env overrides
    pub fn load() -> Result<Self, String> {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load configuration from an explicit file path (plus env overrides)
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("MAITRE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| format!("Failed to read configuration: {e}"))?;

        let loaded: Self = settings
            .try_deserialize()
            .map_err(|e| format!("Invalid configuration: {e}"))?;

        loaded.speech.validate()?;

        info!(
            model = %loaded.inference.default_model,
            speech = ?loaded.speech.provider,
            "Configuration loaded"
        );

        Ok(loaded)
    }
}

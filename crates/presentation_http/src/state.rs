//! Application state shared across handlers

use std::sync::Arc;

use ai_speech::GoogleTtsProvider;
use application::ChatService;
use domain::Persona;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat service for conversation handling
    pub chat_service: Arc<ChatService>,
    /// Persona whose system prompt frames every chat request
    pub persona: Arc<Persona>,
    /// Cloud TTS provider; `None` when no API key is configured
    pub tts: Option<Arc<GoogleTtsProvider>>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

//! Configuration for speech processing

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for speech synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Speech provider to use
    #[serde(default)]
    pub provider: SpeechProvider,

    /// Whether spoken replies are enabled at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Named synthesizer voice to pin (bypasses the preference walk)
    #[serde(default)]
    pub voice: Option<String>,

    /// Speaking rate in words per minute
    #[serde(default = "default_rate_wpm")]
    pub rate_wpm: u32,

    /// Reference recording for the cloned provider
    #[serde(default)]
    pub reference_audio: Option<PathBuf>,

    /// Path to the OS synthesizer binary
    #[serde(default = "default_say_path")]
    pub say_path: String,

    /// Path to the audio player binary
    #[serde(default = "default_player_path")]
    pub player_path: String,

    /// Path to the media probe binary
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: String,

    /// Path to the media converter binary
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Google Cloud TTS API key (for the google provider)
    #[serde(default)]
    pub google_api_key: Option<String>,

    /// Google Cloud TTS base URL (for custom endpoints and tests)
    #[serde(default = "default_google_base_url")]
    pub google_base_url: String,

    /// Request timeout in milliseconds (cloud provider)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Speech provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// OS speech synthesizer with a fixed voice
    #[default]
    System,
    /// OS synthesizer with voice/rate picked from a reference recording
    Cloned,
    /// Google Cloud TTS REST API
    Google,
}

const fn default_enabled() -> bool {
    true
}

const fn default_rate_wpm() -> u32 {
    180
}

fn default_say_path() -> String {
    "say".to_string()
}

fn default_player_path() -> String {
    "afplay".to_string()
}

fn default_ffprobe_path() -> String {
    "ffprobe".to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_google_base_url() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::default(),
            enabled: default_enabled(),
            voice: None,
            rate_wpm: default_rate_wpm(),
            reference_audio: None,
            say_path: default_say_path(),
            player_path: default_player_path(),
            ffprobe_path: default_ffprobe_path(),
            ffmpeg_path: default_ffmpeg_path(),
            google_api_key: None,
            google_base_url: default_google_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(80..=400).contains(&self.rate_wpm) {
            return Err(format!(
                "rate_wpm must be between 80 and 400, got {}",
                self.rate_wpm
            ));
        }

        if self.provider == SpeechProvider::Google && self.google_api_key.is_none() {
            return Err("Google API key is required for the google provider".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

//! Configuration for the inference client

use serde::{Deserialize, Serialize};

/// Configuration for the inference client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top-p (nucleus) sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

pub(crate) const fn default_timeout_ms() -> u64 {
    300_000 // 5 minutes: local models on small hardware can be slow
}

const fn default_max_tokens() -> u32 {
    2048
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_top_p() -> f32 {
    0.9
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

impl InferenceConfig {
    /// Config tuned for short, fast replies (low token budget, short timeout)
    pub fn quick_reply() -> Self {
        Self {
            timeout_ms: 10_000,
            max_tokens: 80,
            ..Self::default()
        }
    }
}

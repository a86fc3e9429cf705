//! Adapters - Application ports implemented over ai_core and ai_speech

mod ollama_inference_adapter;
mod speech_adapter;

pub use ollama_inference_adapter::OllamaInferenceAdapter;
pub use speech_adapter::SpeechAdapter;

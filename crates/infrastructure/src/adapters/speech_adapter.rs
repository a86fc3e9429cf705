//! Speech adapter - Implements SpeechPort using ai_speech providers

use std::sync::Arc;

use ai_speech::{
    ClonedVoiceProvider, GoogleTtsProvider, SpeechConfig, SpeechError, SpeechProvider,
    SystemVoiceProvider, TextToSpeech,
};
use application::{
    error::ApplicationError,
    ports::{SpeechPort, SynthesisResult},
};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Adapter that selects and wraps an ai_speech provider
pub struct SpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("voice", &self.provider.voice_description())
            .finish()
    }
}

impl SpeechAdapter {
    /// Create an adapter for the provider named in the configuration.
    ///
    /// The cloned provider probes its reference recording here, so this is
    /// async; it degrades to plain system-voice behavior internally when
    /// the reference is unusable.
    pub async fn from_config(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider: Arc<dyn TextToSpeech> = match config.provider {
            SpeechProvider::System => {
                Arc::new(SystemVoiceProvider::new(config).map_err(Self::map_error)?)
            },
            SpeechProvider::Cloned => Arc::new(
                ClonedVoiceProvider::new(config)
                    .await
                    .map_err(Self::map_error)?,
            ),
            SpeechProvider::Google => {
                Arc::new(GoogleTtsProvider::new(config).map_err(Self::map_error)?)
            },
        };

        info!(voice = %provider.voice_description(), "Initialized speech provider");

        Ok(Self { provider })
    }

    /// Wrap an already-built provider (used by tests and the voice tooling)
    pub fn from_provider(provider: Arc<dyn TextToSpeech>) -> Self {
        Self { provider }
    }

    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            SpeechError::ConnectionFailed(e)
            | SpeechError::RequestFailed(e)
            | SpeechError::NotAvailable(e) => ApplicationError::ExternalService(e),
            SpeechError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Speech timeout after {ms}ms"))
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn speak(&self, text: &str) -> Result<(), ApplicationError> {
        self.provider.speak(text).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, ApplicationError> {
        let audio = self
            .provider
            .synthesize(text, None)
            .await
            .map_err(Self::map_error)?;

        Ok(SynthesisResult {
            mime_type: audio.mime_type().to_string(),
            audio: audio.into_data(),
        })
    }

    async fn is_available(&self) -> bool {
        self.provider.is_available().await
    }

    fn voice_description(&self) -> String {
        self.provider.voice_description()
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::{AudioData, AudioFormat, VoiceInfo};

    use super::*;

    struct FakeTts;

    #[async_trait]
    impl TextToSpeech for FakeTts {
        async fn synthesize(
            &self,
            _text: &str,
            _voice: Option<&str>,
        ) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(vec![1, 2, 3], AudioFormat::Mp3))
        }

        async fn speak(&self, _text: &str) -> Result<(), SpeechError> {
            Err(SpeechError::SynthesisFailed("no speakers".to_string()))
        }

        async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
            Ok(vec![])
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn default_voice(&self) -> &str {
            "Fake"
        }

        fn voice_description(&self) -> String {
            "Fake voice".to_string()
        }
    }

    #[tokio::test]
    async fn synthesize_maps_to_result_with_mime() {
        let adapter = SpeechAdapter::from_provider(Arc::new(FakeTts));
        let result = adapter.synthesize("hello").await.unwrap();
        assert_eq!(result.audio, vec![1, 2, 3]);
        assert_eq!(result.mime_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn speak_errors_map_to_application_errors() {
        let adapter = SpeechAdapter::from_provider(Arc::new(FakeTts));
        let err = adapter.speak("hello").await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[tokio::test]
    async fn from_config_builds_system_provider() {
        let adapter = SpeechAdapter::from_config(SpeechConfig::default()).await.unwrap();
        assert!(adapter.voice_description().contains("system voice"));
    }

    #[tokio::test]
    async fn from_config_rejects_google_without_key() {
        let config = SpeechConfig {
            provider: SpeechProvider::Google,
            ..SpeechConfig::default()
        };
        assert!(SpeechAdapter::from_config(config).await.is_err());
    }

    #[test]
    fn configuration_errors_map_through() {
        let err = SpeechAdapter::map_error(SpeechError::Configuration("bad".to_string()));
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }
}

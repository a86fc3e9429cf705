//! Google Cloud TTS provider
//!
//! Wraps the `text:synthesize` REST endpoint. Voice selection is the fixed
//! language/gender table the web demo exposes; audio always comes back as
//! MP3.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat, VoiceInfo};

/// Languages the synthesis demo offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisLanguage {
    English,
    Hindi,
    /// Code-switched Hindi/English, served by Indian English voices
    Hinglish,
}

impl SynthesisLanguage {
    /// BCP-47 language code sent to the API
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Hindi => "hi-IN",
            Self::Hinglish => "en-IN",
        }
    }
}

impl std::str::FromStr for SynthesisLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" => Ok(Self::English),
            "hindi" => Ok(Self::Hindi),
            "hinglish" => Ok(Self::Hinglish),
            _ => Err(format!(
                "Unknown language: {s}. Use English, Hindi or Hinglish"
            )),
        }
    }
}

/// Voice gender selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceGender {
    Male,
    Female,
}

impl VoiceGender {
    /// SSML gender name sent to the API
    #[must_use]
    pub const fn ssml_name(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl std::str::FromStr for VoiceGender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(format!("Unknown gender: {s}. Use Male or Female")),
        }
    }
}

/// Wavenet voice name for a language/gender pair (a total lookup)
#[must_use]
pub const fn voice_name(language: SynthesisLanguage, gender: VoiceGender) -> &'static str {
    match (language, gender) {
        (SynthesisLanguage::English, VoiceGender::Male) => "en-US-Wavenet-D",
        (SynthesisLanguage::English, VoiceGender::Female) => "en-US-Wavenet-F",
        (SynthesisLanguage::Hindi, VoiceGender::Male) => "hi-IN-Wavenet-B",
        (SynthesisLanguage::Hindi, VoiceGender::Female) => "hi-IN-Wavenet-A",
        (SynthesisLanguage::Hinglish, VoiceGender::Male) => "en-IN-Wavenet-C",
        (SynthesisLanguage::Hinglish, VoiceGender::Female) => "en-IN-Wavenet-D",
    }
}

/// TTS provider backed by the Google Cloud REST API
#[derive(Debug, Clone)]
pub struct GoogleTtsProvider {
    client: Client,
    config: SpeechConfig,
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    name: &'a str,
    #[serde(rename = "ssmlGender")]
    ssml_gender: &'a str,
}

#[derive(Debug, Serialize)]
struct AudioConfig<'a> {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'a str,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

impl GoogleTtsProvider {
    /// Create a new provider. Requires an API key in the configuration.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        if config.google_api_key.is_none() {
            return Err(SpeechError::Configuration(
                "Google API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.google_api_key.as_deref().unwrap_or_default()
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.config.google_base_url)
    }

    /// Synthesize speech for an explicit language/gender pair
    #[instrument(skip(self, text), fields(text_len = text.len(), ?language, ?gender))]
    pub async fn synthesize_dialog(
        &self,
        text: &str,
        language: SynthesisLanguage,
        gender: VoiceGender,
    ) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Cannot synthesize empty text".to_string(),
            ));
        }

        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: language.code(),
                name: voice_name(language, gender),
                ssml_gender: gender.ssml_name(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        debug!(voice = request.voice.name, "Requesting cloud synthesis");

        let response = self
            .client
            .post(self.synthesize_url())
            .query(&[("key", self.api_key())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::SynthesisFailed(format!("HTTP {status}: {body}")));
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let audio = BASE64.decode(parsed.audio_content).map_err(|e| {
            SpeechError::InvalidResponse(format!("Invalid base64 audio content: {e}"))
        })?;

        if audio.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Service returned empty audio".to_string(),
            ));
        }

        Ok(AudioData::new(audio, AudioFormat::Mp3))
    }
}

#[async_trait]
impl TextToSpeech for GoogleTtsProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        _voice: Option<&str>,
    ) -> Result<AudioData, SpeechError> {
        // The port carries no language information; default to the demo's
        // English female voice
        self.synthesize_dialog(text, SynthesisLanguage::English, VoiceGender::Female)
            .await
    }

    async fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        // The cloud provider serves the web demo; it returns bytes to the
        // browser and never plays audio locally
        Err(SpeechError::NotAvailable(
            "Cloud provider does not support local playback".to_string(),
        ))
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        let voices = [
            (SynthesisLanguage::English, VoiceGender::Male),
            (SynthesisLanguage::English, VoiceGender::Female),
            (SynthesisLanguage::Hindi, VoiceGender::Male),
            (SynthesisLanguage::Hindi, VoiceGender::Female),
            (SynthesisLanguage::Hinglish, VoiceGender::Male),
            (SynthesisLanguage::Hinglish, VoiceGender::Female),
        ];

        Ok(voices
            .iter()
            .map(|&(language, gender)| {
                let name = voice_name(language, gender);
                VoiceInfo::new(name, name).with_language(language.code())
            })
            .collect())
    }

    async fn is_available(&self) -> bool {
        self.config.google_api_key.is_some()
    }

    fn default_voice(&self) -> &str {
        voice_name(SynthesisLanguage::English, VoiceGender::Female)
    }

    fn voice_description(&self) -> String {
        format!("{} (cloud voice)", self.default_voice())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn provider() -> GoogleTtsProvider {
        let config = SpeechConfig {
            google_api_key: Some("test-key".to_string()),
            ..SpeechConfig::default()
        };
        GoogleTtsProvider::new(config).unwrap()
    }

    #[test]
    fn voice_table_matches_demo_mapping() {
        assert_eq!(
            voice_name(SynthesisLanguage::English, VoiceGender::Male),
            "en-US-Wavenet-D"
        );
        assert_eq!(
            voice_name(SynthesisLanguage::English, VoiceGender::Female),
            "en-US-Wavenet-F"
        );
        assert_eq!(
            voice_name(SynthesisLanguage::Hindi, VoiceGender::Male),
            "hi-IN-Wavenet-B"
        );
        assert_eq!(
            voice_name(SynthesisLanguage::Hindi, VoiceGender::Female),
            "hi-IN-Wavenet-A"
        );
        assert_eq!(
            voice_name(SynthesisLanguage::Hinglish, VoiceGender::Male),
            "en-IN-Wavenet-C"
        );
        assert_eq!(
            voice_name(SynthesisLanguage::Hinglish, VoiceGender::Female),
            "en-IN-Wavenet-D"
        );
    }

    #[test]
    fn language_codes() {
        assert_eq!(SynthesisLanguage::English.code(), "en-US");
        assert_eq!(SynthesisLanguage::Hindi.code(), "hi-IN");
        assert_eq!(SynthesisLanguage::Hinglish.code(), "en-IN");
    }

    #[test]
    fn language_parses_case_insensitive() {
        assert_eq!(
            SynthesisLanguage::from_str("hinglish").unwrap(),
            SynthesisLanguage::Hinglish
        );
        assert_eq!(
            SynthesisLanguage::from_str("English").unwrap(),
            SynthesisLanguage::English
        );
        assert!(SynthesisLanguage::from_str("french").is_err());
    }

    #[test]
    fn gender_parses_case_insensitive() {
        assert_eq!(VoiceGender::from_str("MALE").unwrap(), VoiceGender::Male);
        assert_eq!(VoiceGender::from_str("female").unwrap(), VoiceGender::Female);
        assert!(VoiceGender::from_str("other").is_err());
    }

    #[test]
    fn new_requires_api_key() {
        assert!(GoogleTtsProvider::new(SpeechConfig::default()).is_err());
    }

    #[test]
    fn synthesize_url_is_rooted_at_base() {
        assert_eq!(
            provider().synthesize_url(),
            "https://texttospeech.googleapis.com/v1/text:synthesize"
        );
    }

    #[tokio::test]
    async fn local_playback_is_refused() {
        let result = provider().speak("hello").await;
        assert!(matches!(result, Err(SpeechError::NotAvailable(_))));
    }

    #[tokio::test]
    async fn synthesize_dialog_rejects_empty_text() {
        let result = provider()
            .synthesize_dialog("  ", SynthesisLanguage::English, VoiceGender::Female)
            .await;
        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn list_voices_covers_all_pairs() {
        let voices = provider().list_voices().await.unwrap();
        assert_eq!(voices.len(), 6);
        assert!(voices.iter().any(|v| v.id == "hi-IN-Wavenet-A"));
    }
}

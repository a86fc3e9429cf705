//! Cloned voice provider
//!
//! "Cloning" by lookup table: the reference recording is probed for its
//! container metadata and the resulting profile pins a named system voice
//! and speaking rate. Without a usable reference the provider behaves like
//! the plain system voice.

use async_trait::async_trait;
use domain::VoiceProfile;
use tracing::{info, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::playback::AudioPlayer;
use crate::ports::TextToSpeech;
use crate::probe::AudioProbe;
use crate::providers::system::SystemVoiceProvider;
use crate::types::{AudioData, VoiceInfo};

/// TTS provider that matches voice and rate to a reference recording
#[derive(Debug, Clone)]
pub struct ClonedVoiceProvider {
    inner: SystemVoiceProvider,
    player: AudioPlayer,
    profile: Option<VoiceProfile>,
    reference_name: Option<String>,
}

impl ClonedVoiceProvider {
    /// Create a provider by probing the configured reference recording.
    ///
    /// A missing or unprobeable reference degrades to system-voice behavior
    /// instead of failing: the chat loop must keep speaking either way.
    pub async fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        let probe = AudioProbe::from_config(&config);
        let player = AudioPlayer::from_config(&config);
        let reference = config.reference_audio.clone();
        let inner = SystemVoiceProvider::new(config)?;

        let (profile, reference_name) = match reference {
            Some(path) => {
                let name = path.display().to_string();
                match probe.probe(&path).await {
                    Ok(profile) => {
                        info!(
                            reference = %name,
                            voice = profile.preferred_voice(),
                            rate = profile.speaking_rate(),
                            "Matched voice to reference recording"
                        );
                        (Some(profile), Some(name))
                    },
                    Err(e) => {
                        warn!(reference = %name, error = %e, "Reference probe failed, using system voice");
                        (None, None)
                    },
                }
            },
            None => (None, None),
        };

        Ok(Self {
            inner,
            player,
            profile,
            reference_name,
        })
    }

    /// Create a provider from an already-computed profile (no probing)
    pub fn from_profile(
        config: SpeechConfig,
        profile: VoiceProfile,
    ) -> Result<Self, SpeechError> {
        let player = AudioPlayer::from_config(&config);
        let inner = SystemVoiceProvider::new(config)?;
        Ok(Self {
            inner,
            player,
            profile: Some(profile),
            reference_name: None,
        })
    }

    /// The profile in use, when a reference was matched
    pub const fn profile(&self) -> Option<&VoiceProfile> {
        self.profile.as_ref()
    }

    /// Voice name selected by the profile, or the system default
    fn matched_voice(&self) -> &str {
        self.profile
            .as_ref()
            .map_or_else(|| self.inner.default_voice(), |p| p.preferred_voice())
    }

    /// Speaking rate selected by the profile, or the configured rate
    fn matched_rate(&self) -> u32 {
        self.profile
            .as_ref()
            .map_or_else(|| self.inner.rate_wpm(), VoiceProfile::speaking_rate)
    }

    /// The original pipeline: synthesize to a temp file with the matched
    /// voice, hand it to the player, reclaim the file afterwards.
    async fn speak_via_file(&self, text: &str) -> Result<(), SpeechError> {
        let audio = self
            .inner
            .synthesize_as(text, Some(self.matched_voice()), self.matched_rate())
            .await?;

        let file = tempfile::NamedTempFile::with_suffix(".aiff").map_err(|e| {
            SpeechError::PlaybackFailed(format!("Failed to create temp file: {e}"))
        })?;
        tokio::fs::write(file.path(), audio.data()).await.map_err(|e| {
            SpeechError::PlaybackFailed(format!("Failed to write audio file: {e}"))
        })?;

        self.player.play(file.path()).await
    }
}

#[async_trait]
impl TextToSpeech for ClonedVoiceProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<AudioData, SpeechError> {
        let voice = voice.unwrap_or_else(|| self.matched_voice());
        self.inner
            .synthesize_as(text, Some(voice), self.matched_rate())
            .await
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        match self.speak_via_file(text).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "File playback failed, falling back to direct synthesis");
                self.inner
                    .speak_as(text, Some(self.matched_voice()), self.matched_rate())
                    .await
            },
        }
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        self.inner.list_voices().await
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }

    fn default_voice(&self) -> &str {
        self.matched_voice()
    }

    fn voice_description(&self) -> String {
        match (&self.profile, &self.reference_name) {
            (Some(profile), Some(reference)) => format!(
                "{} at {} wpm (matched to {})",
                profile.preferred_voice(),
                profile.speaking_rate(),
                reference
            ),
            (Some(profile), None) => format!(
                "{} at {} wpm (matched to reference)",
                profile.preferred_voice(),
                profile.speaking_rate()
            ),
            _ => self.inner.voice_description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn high_pitch_profile() -> VoiceProfile {
        VoiceProfile::new(48_000, 15.0, 1, Some(192_000)).with_words_per_minute(140)
    }

    #[test]
    fn profile_pins_voice_and_rate() {
        let provider =
            ClonedVoiceProvider::from_profile(SpeechConfig::default(), high_pitch_profile())
                .unwrap();
        assert_eq!(provider.default_voice(), "Samantha");
        assert_eq!(provider.matched_rate(), 140);
    }

    #[test]
    fn low_pitch_reference_selects_moira() {
        let profile = VoiceProfile::new(8_000, 15.0, 1, Some(128_000));
        let provider =
            ClonedVoiceProvider::from_profile(SpeechConfig::default(), profile).unwrap();
        assert_eq!(provider.default_voice(), "Moira");
    }

    #[test]
    fn description_mentions_match() {
        let provider =
            ClonedVoiceProvider::from_profile(SpeechConfig::default(), high_pitch_profile())
                .unwrap();
        let desc = provider.voice_description();
        assert!(desc.contains("Samantha"));
        assert!(desc.contains("140 wpm"));
        assert!(desc.contains("matched"));
    }

    #[tokio::test]
    async fn missing_reference_degrades_to_system_voice() {
        let config = SpeechConfig {
            reference_audio: Some("/nonexistent/sample.wav".into()),
            ..SpeechConfig::default()
        };
        // Probing fails but construction succeeds
        let provider = ClonedVoiceProvider::new(config).await.unwrap();
        assert!(provider.profile().is_none());
        assert_eq!(provider.default_voice(), "Samantha");
        assert!(provider.voice_description().contains("system voice"));
    }

    #[tokio::test]
    async fn no_reference_configured_uses_system_voice() {
        let provider = ClonedVoiceProvider::new(SpeechConfig::default()).await.unwrap();
        assert!(provider.profile().is_none());
    }

    #[tokio::test]
    async fn speak_rejects_empty_text() {
        let provider =
            ClonedVoiceProvider::from_profile(SpeechConfig::default(), high_pitch_profile())
                .unwrap();
        assert!(provider.speak("").await.is_err());
    }
}

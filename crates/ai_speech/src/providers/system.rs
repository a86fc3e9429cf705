//! System voice provider
//!
//! Shells out to the OS speech synthesizer (`say` on macOS). With no voice
//! pinned in configuration it walks a small list of warm-sounding voices and
//! falls back to the synthesizer default when every named voice fails, which
//! happens on machines that never installed them.

use std::process::Stdio;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat, VoiceInfo};

/// Voices tried in order when none is configured
pub const WARM_VOICES: [&str; 4] = ["Samantha", "Karen", "Moira", "Tessa"];

/// TTS provider backed by the OS `say` command
#[derive(Debug, Clone)]
pub struct SystemVoiceProvider {
    config: SpeechConfig,
}

impl SystemVoiceProvider {
    /// Create a new system voice provider
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self { config })
    }

    /// The configured synthesizer binary
    fn say_path(&self) -> &str {
        &self.config.say_path
    }

    /// Configured speaking rate
    pub const fn rate_wpm(&self) -> u32 {
        self.config.rate_wpm
    }

    /// Run `say` once with an explicit voice; `None` uses the synthesizer
    /// default voice
    async fn run_say(
        &self,
        text: &str,
        voice: Option<&str>,
        rate: u32,
        output: Option<&std::path::Path>,
    ) -> Result<(), SpeechError> {
        let mut cmd = Command::new(self.say_path());

        if let Some(voice) = voice {
            cmd.args(["-v", voice]);
        }
        cmd.args(["-r", &rate.to_string()]);
        if let Some(path) = output {
            cmd.arg("-o").arg(path);
        }
        cmd.arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!(?voice, rate, "Running speech synthesizer");

        let result = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::NotAvailable(format!(
                    "Speech synthesizer not found at '{}'",
                    self.say_path()
                ))
            } else {
                SpeechError::SynthesisFailed(format!("Failed to run synthesizer: {e}"))
            }
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SpeechError::SynthesisFailed(format!(
                "Synthesizer exited with status {}: {}",
                result.status,
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Speak with a fixed voice and rate, walking the fallback chain:
    /// requested voice, then the synthesizer default.
    pub(crate) async fn speak_as(
        &self,
        text: &str,
        voice: Option<&str>,
        rate: u32,
    ) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Cannot synthesize empty text".to_string(),
            ));
        }

        // Walk the preference list when nothing is pinned
        let candidates: Vec<Option<&str>> = match voice {
            Some(v) => vec![Some(v)],
            None => WARM_VOICES.iter().map(|v| Some(*v)).collect(),
        };

        for candidate in candidates {
            match self.run_say(text, candidate, rate, None).await {
                Ok(()) => return Ok(()),
                Err(SpeechError::NotAvailable(msg)) => {
                    return Err(SpeechError::NotAvailable(msg));
                },
                Err(e) => {
                    warn!(voice = ?candidate, error = %e, "Voice failed, trying next");
                },
            }
        }

        // Last resort: the synthesizer's own default voice
        self.run_say(text, None, rate, None).await
    }

    /// The effective voice: pinned voice or the first preference
    fn effective_voice(&self) -> &str {
        self.config.voice.as_deref().unwrap_or(WARM_VOICES[0])
    }

    /// Synthesize to AIFF bytes with an explicit voice and rate
    pub(crate) async fn synthesize_as(
        &self,
        text: &str,
        voice: Option<&str>,
        rate: u32,
    ) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Cannot synthesize empty text".to_string(),
            ));
        }

        let output_file = NamedTempFile::with_suffix(".aiff").map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to create temp file: {e}"))
        })?;

        self.run_say(text, voice, rate, Some(output_file.path())).await?;

        let data = tokio::fs::read(output_file.path()).await.map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to read synthesizer output: {e}"))
        })?;

        if data.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Synthesizer produced empty output".to_string(),
            ));
        }

        Ok(AudioData::new(data, AudioFormat::Aiff))
    }
}

#[async_trait]
impl TextToSpeech for SystemVoiceProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<AudioData, SpeechError> {
        let voice = voice.or(self.config.voice.as_deref());
        self.synthesize_as(text, voice, self.config.rate_wpm).await
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.speak_as(text, self.config.voice.as_deref(), self.config.rate_wpm)
            .await
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        // `say -v ?` prints the installed voices; fall back to the curated
        // list when the synthesizer is not around to ask
        let output = Command::new(self.say_path())
            .args(["-v", "?"])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await;

        if let Ok(out) = output {
            if out.status.success() {
                let listing = String::from_utf8_lossy(&out.stdout);
                let voices = parse_voice_listing(&listing);
                if !voices.is_empty() {
                    return Ok(voices);
                }
            }
        }

        Ok(WARM_VOICES
            .iter()
            .map(|name| VoiceInfo::new(*name, *name).with_language("en"))
            .collect())
    }

    async fn is_available(&self) -> bool {
        Command::new(self.say_path())
            .args(["-v", "?"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    fn default_voice(&self) -> &str {
        self.effective_voice()
    }

    fn voice_description(&self) -> String {
        format!(
            "{} at {} wpm (system voice)",
            self.effective_voice(),
            self.config.rate_wpm
        )
    }
}

/// Parse `say -v ?` output: `Name    lang_TAG  # sample sentence`
fn parse_voice_listing(listing: &str) -> Vec<VoiceInfo> {
    listing
        .lines()
        .filter_map(|line| {
            let before_comment = line.split('#').next().unwrap_or(line).trim_end();
            let mut parts = before_comment.split_whitespace();
            let name = parts.next()?;
            let language = parts.next_back().unwrap_or_default();

            let comment = line.split('#').nth(1).map(str::trim);

            let mut voice = VoiceInfo::new(name, name);
            if !language.is_empty() {
                voice = voice.with_language(language.replace('_', "-"));
            }
            if let Some(comment) = comment {
                voice = voice.with_description(comment);
            }
            Some(voice)
        })
        .collect()
}

//! Reference-audio probing
//!
//! Runs `ffprobe` against a reference recording and reduces the container
//! metadata to a `VoiceProfile`. This is the whole extent of "voice
//! analysis" in this system: sample rate, duration, channels and bit rate.

use std::path::Path;
use std::process::Stdio;

use domain::VoiceProfile;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;

/// Media probe built on ffprobe
#[derive(Debug, Clone)]
pub struct AudioProbe {
    ffprobe_path: String,
}

/// ffprobe `-print_format json` output (the fields we read)
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    // ffprobe reports numbers as strings in JSON output
    #[serde(default)]
    sample_rate: Option<String>,
    #[serde(default)]
    channels: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    bit_rate: Option<String>,
}

impl Default for AudioProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioProbe {
    /// Create a probe that finds ffprobe in PATH
    #[must_use]
    pub fn new() -> Self {
        Self {
            ffprobe_path: "ffprobe".to_string(),
        }
    }

    /// Create a probe with an explicit ffprobe path
    #[must_use]
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: path.into(),
        }
    }

    /// Create a probe from speech configuration
    #[must_use]
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::with_path(config.ffprobe_path.clone())
    }

    /// Check if ffprobe is installed
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(&self.ffprobe_path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Probe a reference recording into a voice profile.
    ///
    /// Metadata the probe cannot read falls back to the default profile
    /// values, so the result is always usable for voice selection.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn probe(&self, path: &Path) -> Result<VoiceProfile, SpeechError> {
        if !path.exists() {
            return Err(SpeechError::AnalysisFailed(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SpeechError::NotAvailable(format!(
                        "ffprobe not found at '{}'. Please install FFmpeg.",
                        self.ffprobe_path
                    ))
                } else {
                    SpeechError::AnalysisFailed(format!("Failed to run ffprobe: {e}"))
                }
            })?;

        if !output.status.success() {
            return Err(SpeechError::AnalysisFailed(format!(
                "ffprobe exited with status {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(Self::profile_from_json(&text).unwrap_or_else(|| {
            warn!(path = %path.display(), "Could not read probe metadata, using default profile");
            VoiceProfile::default()
        }))
    }

    /// Reduce ffprobe JSON to a voice profile. Returns `None` when the
    /// output has no usable audio stream at all.
    fn profile_from_json(json: &str) -> Option<VoiceProfile> {
        let parsed: ProbeOutput = serde_json::from_str(json).ok()?;

        let stream = parsed
            .streams
            .iter()
            .find(|s| s.sample_rate.is_some() || s.channels.is_some())?;

        let defaults = VoiceProfile::default();

        let sample_rate = stream
            .sample_rate
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.sample_rate);
        let channels = stream.channels.unwrap_or(defaults.channels);

        let (duration_secs, bit_rate) = parsed.format.map_or((0.0, None), |f| {
            (
                f.duration.as_deref().and_then(|s| s.parse().ok()).unwrap_or(0.0),
                f.bit_rate.as_deref().and_then(|s| s.parse().ok()),
            )
        });

        let profile = VoiceProfile::new(sample_rate, duration_secs, channels, bit_rate);
        debug!(?profile, "Probed reference recording");
        Some(profile)
    }
}

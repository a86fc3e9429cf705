//! Reference-sample preparation
//!
//! Normalizes a recording into the shape voice analysis expects:
//! 22.05 kHz, mono, 16-bit PCM WAV.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::config::SpeechConfig;
use crate::error::SpeechError;

/// Default location for the prepared reference sample
pub const PREPARED_SAMPLE_PATH: &str = "voice_samples/prepared_voice.wav";

/// Target sample rate for prepared samples
const TARGET_SAMPLE_RATE: u32 = 22_050;

/// Normalizes reference recordings with ffmpeg
#[derive(Debug, Clone)]
pub struct SamplePreparer {
    ffmpeg_path: String,
}

impl Default for SamplePreparer {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplePreparer {
    /// Create a preparer that finds ffmpeg in PATH
    #[must_use]
    pub fn new() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }

    /// Create a preparer with an explicit ffmpeg path
    #[must_use]
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: path.into(),
        }
    }

    /// Create a preparer from speech configuration
    #[must_use]
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::with_path(config.ffmpeg_path.clone())
    }

    /// Check if ffmpeg is installed
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Prepare a recording into the default sample location
    pub async fn prepare(&self, input: &Path) -> Result<PathBuf, SpeechError> {
        self.prepare_to(input, Path::new(PREPARED_SAMPLE_PATH)).await
    }

    /// Prepare a recording into an explicit output path.
    ///
    /// The parent directory is created if needed; an existing output file is
    /// overwritten.
    #[instrument(skip(self), fields(input = %input.display(), output = %output.display()))]
    pub async fn prepare_to(&self, input: &Path, output: &Path) -> Result<PathBuf, SpeechError> {
        if !input.exists() {
            return Err(SpeechError::AnalysisFailed(format!(
                "File not found: {}",
                input.display()
            )));
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    SpeechError::AnalysisFailed(format!(
                        "Failed to create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let result = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-ar", "22050", "-ac", "1", "-acodec", "pcm_s16le", "-y"])
            .arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SpeechError::NotAvailable(format!(
                        "ffmpeg not found at '{}'. Please install FFmpeg.",
                        self.ffmpeg_path
                    ))
                } else {
                    SpeechError::AnalysisFailed(format!("Failed to run ffmpeg: {e}"))
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SpeechError::AnalysisFailed(format!(
                "ffmpeg exited with status {}: {}",
                result.status,
                stderr.trim()
            )));
        }

        debug!(rate = TARGET_SAMPLE_RATE, "Prepared reference sample");

        Ok(output.to_path_buf())
    }
}

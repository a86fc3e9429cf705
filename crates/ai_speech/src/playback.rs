//! Audio playback through an external player
//!
//! Playback awaits the player process, so synthesized temp files can be
//! reclaimed as soon as the reply has been heard.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::config::SpeechConfig;
use crate::error::SpeechError;

/// Plays audio files with the configured player binary (`afplay` by default)
#[derive(Debug, Clone)]
pub struct AudioPlayer {
    player_path: String,
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer {
    /// Create a player that finds the binary in PATH
    #[must_use]
    pub fn new() -> Self {
        Self {
            player_path: "afplay".to_string(),
        }
    }

    /// Create a player with an explicit binary path
    #[must_use]
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            player_path: path.into(),
        }
    }

    /// Create a player from speech configuration
    #[must_use]
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::with_path(config.player_path.clone())
    }

    /// Check if the player is installed
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        // afplay has no --version; a bare invocation exits non-zero but
        // proves the binary exists
        Command::new(&self.player_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok()
    }

    /// Play a file and wait for playback to finish
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn play(&self, path: &Path) -> Result<(), SpeechError> {
        let status = Command::new(&self.player_path)
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| SpeechError::PlaybackFailed(format!("Failed to run player: {e}")))?;

        if !status.success() {
            return Err(SpeechError::PlaybackFailed(format!(
                "Player exited with status {status}"
            )));
        }

        debug!("Playback finished");
        Ok(())
    }

}

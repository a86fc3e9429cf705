//! Voice profile - Coarse acoustics of a reference recording
//!
//! This is not speaker modelling. The profile carries the container metadata
//! a media probe can report (sample rate, duration, channels, bit rate) and
//! maps it to a named synthesizer voice, a speaking rate and a volume through
//! fixed lookup tables.

use serde::{Deserialize, Serialize};

/// Coarse pitch class inferred from the recording's sample rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchClass {
    /// Below 22.05 kHz
    Low,
    /// 22.05 kHz up to 44.1 kHz
    Medium,
    /// Above 44.1 kHz
    High,
}

/// Metadata-level profile of a reference recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Channel count
    pub channels: u16,
    /// Container bit rate in bits per second, when the probe reports one
    pub bit_rate: Option<u32>,
    /// Estimated speaking rate; the probe cannot measure this, so it stays
    /// at the default unless a caller overrides it
    pub words_per_minute: u32,
}

impl VoiceProfile {
    /// Assumed speaking rate when nothing better is known
    pub const DEFAULT_WPM: u32 = 150;

    /// Minimum usable reference duration in seconds
    pub const MIN_DURATION_SECS: f64 = 5.0;

    /// Maximum useful reference duration in seconds
    pub const MAX_DURATION_SECS: f64 = 60.0;

    /// Create a profile from probed metadata
    pub fn new(sample_rate: u32, duration_secs: f64, channels: u16, bit_rate: Option<u32>) -> Self {
        Self {
            sample_rate,
            duration_secs,
            channels,
            bit_rate,
            words_per_minute: Self::DEFAULT_WPM,
        }
    }

    /// Override the estimated speaking rate
    #[must_use]
    pub const fn with_words_per_minute(mut self, wpm: u32) -> Self {
        self.words_per_minute = wpm;
        self
    }

    /// Pitch class from the sample rate thresholds
    pub const fn pitch_class(&self) -> PitchClass {
        if self.sample_rate > 44_100 {
            PitchClass::High
        } else if self.sample_rate < 22_050 {
            PitchClass::Low
        } else {
            PitchClass::Medium
        }
    }

    /// Named synthesizer voice for this profile
    pub const fn preferred_voice(&self) -> &'static str {
        match self.pitch_class() {
            PitchClass::High => "Samantha",
            PitchClass::Medium => "Karen",
            PitchClass::Low => "Moira",
        }
    }

    /// Speaking rate in words per minute, clamped to the synthesizer's
    /// usable range
    pub fn speaking_rate(&self) -> u32 {
        self.words_per_minute.clamp(100, 300)
    }

    /// Playback volume in 0.0..=1.0, from the bit-rate class
    pub fn volume(&self) -> f32 {
        match self.bit_rate {
            Some(b) if b < 64_000 => 0.6,
            Some(b) if b >= 192_000 => 1.0,
            _ => 0.8,
        }
    }

    /// Check the recording against the reference-sample guidelines
    pub fn suitability(&self) -> SampleSuitability {
        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        if self.duration_secs < Self::MIN_DURATION_SECS {
            issues.push("Audio too short (less than 5 seconds)".to_string());
            recommendations.push("Record at least 10-30 seconds of speech".to_string());
        } else if self.duration_secs > Self::MAX_DURATION_SECS {
            issues.push("Audio too long (more than 60 seconds)".to_string());
            recommendations.push("Use 10-30 seconds for best results".to_string());
        }

        if self.sample_rate < 16_000 {
            issues.push("Low sample rate (less than 16kHz)".to_string());
            recommendations.push("Record at 22kHz or higher".to_string());
        }

        if self.channels > 1 {
            issues.push("Stereo audio detected".to_string());
            recommendations.push("Mono audio works better for voice matching".to_string());
        }

        if self.bit_rate.unwrap_or(0) < 64_000 {
            issues.push("Low bit rate".to_string());
            recommendations.push("Use higher quality recording".to_string());
        }

        SampleSuitability {
            issues,
            recommendations,
        }
    }
}

impl Default for VoiceProfile {
    /// Profile used when probing fails: a plain 22.05 kHz mono assumption
    fn default() -> Self {
        Self::new(22_050, 0.0, 1, None)
    }
}

/// Result of checking a reference recording against the sample guidelines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSuitability {
    /// Problems that degrade voice matching
    pub issues: Vec<String>,
    /// What to do about each problem, in the same order
    pub recommendations: Vec<String>,
}

impl SampleSuitability {
    /// True when the recording passed every guideline
    pub fn is_suitable(&self) -> bool {
        self.issues.is_empty()
    }
}

//! AI Speech - Text-to-Speech providers and reference-audio tooling
//!
//! Turns companion replies into audio. Three providers share one port:
//!
//! - `SystemVoiceProvider` - the OS speech synthesizer (`say`)
//! - `ClonedVoiceProvider` - system synthesis with voice and rate picked
//!   from the coarse acoustics of a reference recording
//! - `GoogleTtsProvider` - cloud synthesis over the REST API
//!
//! "Cloning" here is deliberately shallow: a media probe reads container
//! metadata from the reference file and a fixed lookup table maps it to a
//! named voice and speaking rate. No speaker-conditioned synthesis happens.
//!
//! The crate also carries the tooling around reference samples: probing
//! (`AudioProbe`), normalization (`SamplePreparer`) and playback
//! (`AudioPlayer`).

pub mod config;
pub mod error;
pub mod playback;
pub mod ports;
pub mod prepare;
pub mod probe;
pub mod providers;
pub mod types;

pub use config::{SpeechConfig, SpeechProvider};
pub use error::SpeechError;
pub use playback::AudioPlayer;
pub use ports::TextToSpeech;
pub use prepare::SamplePreparer;
pub use probe::AudioProbe;
pub use providers::cloned::ClonedVoiceProvider;
pub use providers::google::{GoogleTtsProvider, SynthesisLanguage, VoiceGender};
pub use providers::system::SystemVoiceProvider;
pub use types::{AudioData, AudioFormat, VoiceInfo};

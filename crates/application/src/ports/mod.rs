//! Port definitions - What the application layer needs from the outside

mod inference_port;
mod memory_store;
mod persona_store;
mod speech_port;
mod transcript_port;

pub use inference_port::{InferencePort, InferenceResult, InferenceStream, StreamingChunk};
pub use memory_store::MemoryStorePort;
pub use persona_store::PersonaStorePort;
pub use speech_port::{SpeechPort, SynthesisResult};
pub use transcript_port::TranscriptPort;

#[cfg(test)]
pub use memory_store::MockMemoryStorePort;
#[cfg(test)]
pub use persona_store::MockPersonaStorePort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
#[cfg(test)]
pub use transcript_port::MockTranscriptPort;

//! Domain entities - Objects with identity and lifecycle

mod chat_message;
mod conversation;
mod memory_note;
mod persona;
mod transcript_entry;
mod voice_profile;

pub use chat_message::{ChatMessage, MessageMetadata, MessageRole};
pub use conversation::Conversation;
pub use memory_note::{MemoryNote, wants_remembering};
pub use persona::Persona;
pub use transcript_entry::TranscriptEntry;
pub use voice_profile::{PitchClass, SampleSuitability, VoiceProfile};

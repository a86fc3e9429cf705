//! File-backed persistence
//!
//! Three flat files, no database: the persona profile (JSON), the memory
//! notes (JSON array, atomically rewritten) and the chat transcript
//! (append-only NDJSON, one file per day).

mod memory_store;
mod persona_store;
mod transcript_log;

pub use memory_store::JsonMemoryStore;
pub use persona_store::JsonPersonaStore;
pub use transcript_log::NdjsonTranscriptLog;

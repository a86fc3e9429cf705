//! Application services - Use-case orchestration

mod chat_service;
mod memory_service;
mod voice_reply_service;

pub use chat_service::{ChatService, EMPTY_REPLY_PLACEHOLDER};
pub use memory_service::MemoryService;
pub use voice_reply_service::VoiceReplyService;

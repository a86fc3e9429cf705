//! Conversation entity - An ordered sequence of chat messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChatMessage, MessageRole};
use crate::value_objects::ConversationId;

/// A conversation containing a sequence of messages, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier
    pub id: ConversationId,
    /// Messages in the conversation (append-only)
    pub messages: Vec<ChatMessage>,
    /// When the conversation started
    pub created_at: DateTime<Utc>,
    /// When the conversation was last updated
    pub updated_at: DateTime<Utc>,
    /// System prompt for this conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Conversation {
    /// Create a new empty conversation
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            system_prompt: None,
        }
    }

    /// Create a new conversation with a system prompt
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        let mut conv = Self::new();
        conv.system_prompt = Some(system_prompt.into());
        conv
    }

    /// Append a message to the conversation
    pub fn add_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Append a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::user(content));
    }

    /// Append an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::assistant(content));
    }

    /// Append a seeded system context message
    pub fn add_system_message(&mut self, content: impl Into<String>) {
        self.add_message(ChatMessage::system(content));
    }

    /// Get the last message in the conversation
    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Get the last user message
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
    }

    /// Number of messages in the conversation
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Check if the conversation is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

//! Chat service - Conversation handling against the inference backend

use std::{fmt, sync::Arc, time::Instant};

use domain::{ChatMessage, Conversation, MemoryNote, MessageMetadata, Persona};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{InferencePort, InferenceStream},
};

/// Reply recorded when the model returns nothing
pub const EMPTY_REPLY_PLACEHOLDER: &str = "(no response)";

/// Prefix of the seeded memory context message
const MEMORY_CONTEXT_PREFIX: &str = "Context: Here are personal notes to help you connect: ";

/// How many notes are seeded into a new conversation at most
const MEMORY_SEED_LIMIT: usize = 10;

/// Service for handling chat conversations
pub struct ChatService {
    inference: Arc<dyn InferencePort>,
}

impl fmt::Debug for ChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatService").finish_non_exhaustive()
    }
}

impl ChatService {
    /// Create a new chat service
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Build the starting conversation for a session: persona system prompt,
    /// an optional memory-context message, and the persona greeting as the
    /// first assistant turn.
    pub fn seeded_conversation(persona: &Persona, memories: &[MemoryNote]) -> Conversation {
        let mut conversation = Conversation::with_system_prompt(persona.system_prompt());

        if !memories.is_empty() {
            let notes: Vec<&str> = memories
                .iter()
                .take(MEMORY_SEED_LIMIT)
                .map(|m| m.text.as_str())
                .collect();
            conversation
                .add_system_message(format!("{MEMORY_CONTEXT_PREFIX}{}", notes.join("; ")));
        }

        conversation.add_assistant_message(persona.greeting_line());

        conversation
    }

    /// Normalize a model reply: trimmed, with the placeholder standing in
    /// for an empty one
    pub fn normalize_reply(content: &str) -> String {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            EMPTY_REPLY_PLACEHOLDER.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Handle a single stateless chat message
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn chat(&self, message: &str) -> Result<ChatMessage, ApplicationError> {
        let start = Instant::now();
        let result = self.inference.generate(message).await?;
        Ok(Self::to_chat_message(result, start))
    }

    /// Handle a single stateless chat message under a system prompt
    #[instrument(skip(self, system, message), fields(message_len = message.len()))]
    pub async fn chat_with_system(
        &self,
        system: &str,
        message: &str,
    ) -> Result<ChatMessage, ApplicationError> {
        let start = Instant::now();
        let result = self.inference.generate_with_system(system, message).await?;
        Ok(Self::to_chat_message(result, start))
    }

    /// Continue a conversation with full context
    #[instrument(skip(self, conversation), fields(conv_id = %conversation.id, msg_count = conversation.message_count()))]
    pub async fn continue_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<ChatMessage, ApplicationError> {
        let start = Instant::now();
        let result = self.inference.generate_with_context(conversation).await?;
        Ok(Self::to_chat_message(result, start))
    }

    /// Stream a reply within a conversation context
    #[instrument(skip(self, conversation), fields(conv_id = %conversation.id))]
    pub async fn stream_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<InferenceStream, ApplicationError> {
        self.inference.generate_stream_with_context(conversation).await
    }

    /// Check if the inference backend is healthy
    pub async fn is_healthy(&self) -> bool {
        self.inference.is_healthy().await
    }

    /// Name of the current model
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }

    /// List models available on the backend
    pub async fn list_available_models(&self) -> Result<Vec<String>, ApplicationError> {
        self.inference.list_available_models().await
    }

    fn to_chat_message(result: crate::ports::InferenceResult, start: Instant) -> ChatMessage {
        #[allow(clippy::cast_possible_truncation)]
        let latency = start.elapsed().as_millis() as u64;

        debug!(
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = latency,
            "Chat response generated"
        );

        ChatMessage::assistant(Self::normalize_reply(&result.content)).with_metadata(
            MessageMetadata {
                model: Some(result.model),
                tokens: result.tokens_used,
                latency_ms: Some(latency),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use domain::MessageRole;
    use futures::stream;
    use mockall::mock;

    use super::*;
    use crate::ports::{InferenceResult, StreamingChunk};

    mock! {
        pub Inference {}

        #[async_trait::async_trait]
        impl InferencePort for Inference {
            async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError>;
            async fn generate_with_system(&self, system_prompt: &str, message: &str) -> Result<InferenceResult, ApplicationError>;
            async fn generate_with_context(&self, conversation: &Conversation) -> Result<InferenceResult, ApplicationError>;
            async fn generate_stream_with_context(&self, conversation: &Conversation) -> Result<InferenceStream, ApplicationError>;
            async fn is_healthy(&self) -> bool;
            fn current_model(&self) -> String;
            async fn list_available_models(&self) -> Result<Vec<String>, ApplicationError>;
        }
    }

    fn result(content: &str) -> InferenceResult {
        InferenceResult {
            content: content.to_string(),
            model: "test-model".to_string(),
            tokens_used: Some(42),
            latency_ms: 100,
        }
    }

    fn sample_persona() -> Persona {
        Persona::default()
    }

    #[test]
    fn seeded_conversation_has_prompt_and_greeting() {
        let conv = ChatService::seeded_conversation(&sample_persona(), &[]);

        assert!(conv.system_prompt.as_deref().unwrap().contains("Maitre"));
        assert_eq!(conv.message_count(), 1);
        let greeting = conv.last_message().unwrap();
        assert_eq!(greeting.role, MessageRole::Assistant);
        assert_eq!(greeting.content, "hello commander how are you feeling today");
    }

    #[test]
    fn seeded_conversation_includes_memory_context() {
        let memories = vec![
            MemoryNote::new("likes jazz"),
            MemoryNote::new("daughter's birthday is in June"),
        ];
        let conv = ChatService::seeded_conversation(&sample_persona(), &memories);

        assert_eq!(conv.message_count(), 2);
        let context = &conv.messages[0];
        assert_eq!(context.role, MessageRole::System);
        assert!(context.content.starts_with("Context: Here are personal notes"));
        assert!(context.content.contains("likes jazz; daughter's birthday is in June"));
    }

    #[test]
    fn seeded_conversation_caps_memory_notes() {
        let memories: Vec<MemoryNote> =
            (0..20).map(|i| MemoryNote::new(format!("note {i}"))).collect();
        let conv = ChatService::seeded_conversation(&sample_persona(), &memories);

        let context = &conv.messages[0];
        assert!(context.content.contains("note 9"));
        assert!(!context.content.contains("note 10"));
    }

    #[test]
    fn normalize_reply_trims() {
        assert_eq!(ChatService::normalize_reply("  hi  \n"), "hi");
    }

    #[test]
    fn normalize_reply_replaces_empty() {
        assert_eq!(ChatService::normalize_reply("   "), EMPTY_REPLY_PLACEHOLDER);
        assert_eq!(ChatService::normalize_reply(""), EMPTY_REPLY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn chat_returns_assistant_message() {
        let mut mock = MockInference::new();
        mock.expect_generate()
            .returning(|_| Ok(result("Hello there!")));

        let service = ChatService::new(Arc::new(mock));
        let message = service.chat("Hi").await.unwrap();

        assert_eq!(message.content, "Hello there!");
        assert_eq!(message.role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn chat_attaches_metadata() {
        let mut mock = MockInference::new();
        mock.expect_generate().returning(|_| Ok(result("Reply")));

        let service = ChatService::new(Arc::new(mock));
        let message = service.chat("Test").await.unwrap();

        let metadata = message.metadata.unwrap();
        assert_eq!(metadata.model.as_deref(), Some("test-model"));
        assert_eq!(metadata.tokens, Some(42));
        assert!(metadata.latency_ms.is_some());
    }

    #[tokio::test]
    async fn empty_model_reply_becomes_placeholder() {
        let mut mock = MockInference::new();
        mock.expect_generate().returning(|_| Ok(result("   ")));

        let service = ChatService::new(Arc::new(mock));
        let message = service.chat("Test").await.unwrap();

        assert_eq!(message.content, EMPTY_REPLY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn continue_conversation_uses_context() {
        let mut mock = MockInference::new();
        mock.expect_generate_with_context()
            .returning(|_| Ok(result("Continued")));

        let service = ChatService::new(Arc::new(mock));
        let conv = Conversation::new();
        let message = service.continue_conversation(&conv).await.unwrap();

        assert_eq!(message.content, "Continued");
    }

    #[tokio::test]
    async fn stream_conversation_passes_through() {
        let mut mock = MockInference::new();
        mock.expect_generate_stream_with_context().returning(|_| {
            let chunks = vec![
                Ok(StreamingChunk {
                    content: "He".to_string(),
                    done: false,
                }),
                Ok(StreamingChunk {
                    content: "llo".to_string(),
                    done: true,
                }),
            ];
            Ok(Box::pin(stream::iter(chunks)) as InferenceStream)
        });

        let service = ChatService::new(Arc::new(mock));
        let conv = Conversation::new();
        let stream = service.stream_conversation(&conv).await.unwrap();

        use futures::StreamExt;
        let collected: Vec<_> = stream.collect().await;
        assert_eq!(collected.len(), 2);
    }

    #[tokio::test]
    async fn chat_error_propagates() {
        let mut mock = MockInference::new();
        mock.expect_generate()
            .returning(|_| Err(ApplicationError::Inference("Failed".to_string())));

        let service = ChatService::new(Arc::new(mock));
        assert!(service.chat("Test").await.is_err());
    }

    #[tokio::test]
    async fn health_and_model_pass_through() {
        let mut mock = MockInference::new();
        mock.expect_is_healthy().returning(|| true);
        mock.expect_current_model()
            .returning(|| "llama3.1:8b".to_string());

        let service = ChatService::new(Arc::new(mock));
        assert!(service.is_healthy().await);
        assert_eq!(service.current_model(), "llama3.1:8b");
    }
}

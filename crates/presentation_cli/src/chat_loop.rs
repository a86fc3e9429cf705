//! Interactive chat session
//!
//! The REPL: read a line, dispatch slash commands, otherwise send the turn
//! to the model, stream the reply, speak it, log it. Model failures print a
//! short notice and the loop keeps going.

use std::io::Write as _;

use application::{
    ChatCommand, ChatService, HELP_TEXT, MemoryService, VoiceReplyService,
    ports::{PersonaStorePort, TranscriptPort},
};
use domain::{Conversation, Persona, TranscriptEntry};
use futures::StreamExt;
use infrastructure::{AppConfig, JsonPersonaStore, NdjsonTranscriptLog, SpeechAdapter};
use tracing::debug;

/// Flags from the `chat` subcommand
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    /// Speak replies
    pub voice: bool,
    /// Stream tokens as they arrive
    pub streaming: bool,
}

/// The wired services a session runs on
pub struct SessionServices {
    pub chat: ChatService,
    pub memory: MemoryService,
    pub voice: VoiceReplyService,
    pub transcript: NdjsonTranscriptLog,
    pub persona_store: JsonPersonaStore,
}

/// Run the interactive session until `/exit` or end of input
pub async fn run(config: AppConfig, options: ChatOptions) -> anyhow::Result<()> {
    let mut services = crate::build_session(&config, options.voice).await?;

    let persona = services
        .persona_store
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let memories = services.memory.list().await.unwrap_or_default();
    let mut conversation = ChatService::seeded_conversation(&persona, &memories);

    println!("Maitre Pen-Pal ready. Type /help for commands.\n");

    let greeting = persona.greeting_line();
    println!("Maitre: {greeting}\n");
    services.voice.speak_reply(greeting).await;

    let stdin = tokio::io::stdin();
    let mut lines = tokio::io::AsyncBufReadExt::lines(tokio::io::BufReader::new(stdin));

    loop {
        print!("You: ");
        std::io::stdout().flush().ok();

        let Ok(Some(line)) = lines.next_line().await else {
            println!("\nGoodbye.");
            break;
        };

        match ChatCommand::parse(&line) {
            ChatCommand::Empty => {},

            ChatCommand::Help => println!("{HELP_TEXT}"),

            ChatCommand::Exit => {
                println!("Goodbye.");
                break;
            },

            ChatCommand::ListMemories => match services.memory.list().await {
                Ok(notes) => println!("{}", MemoryService::format_listing(&notes)),
                Err(e) => println!("[could not read memories] {e}"),
            },

            ChatCommand::Remember(note) => match services.memory.remember(&note).await {
                Ok(_) => println!("Saved."),
                Err(e) => println!("[could not save note] {e}"),
            },

            ChatCommand::ClearMemories => match services.memory.clear().await {
                Ok(()) => println!("Cleared all memories."),
                Err(e) => println!("[could not clear memories] {e}"),
            },

            ChatCommand::Status => {
                print_status(&services, &persona, &conversation).await;
            },

            ChatCommand::SetVoice(path) => {
                match rebuild_voice(&config, &path, options.voice).await {
                    Ok(voice) => {
                        services.voice = voice;
                        println!("🔊 Voice set: {}", services.voice.voice_description());
                    },
                    Err(e) => println!("[could not switch voice] {e}"),
                }
            },

            ChatCommand::Malformed(usage) => println!("{usage}"),

            ChatCommand::Unknown(cmd) => {
                println!("Unknown command: {cmd}");
                println!("{HELP_TEXT}");
            },

            ChatCommand::Chat(text) => {
                conversation.add_user_message(&text);

                let content = if options.streaming {
                    stream_reply(&services.chat, &conversation).await
                } else {
                    complete_reply(&services.chat, &conversation).await
                };

                let Some(content) = content else {
                    // Error already printed; keep the loop alive
                    continue;
                };

                conversation.add_assistant_message(&content);
                println!();

                services.voice.speak_reply(&content).await;

                if let Err(e) = services
                    .transcript
                    .append(&TranscriptEntry::new(&text, &content))
                    .await
                {
                    debug!(error = %e, "Transcript append failed");
                }

                if let Ok(Some(note)) = services.memory.capture(&text).await {
                    debug!(note = %note.text, "Auto-captured memory");
                }
            },
        }
    }

    Ok(())
}

/// Stream a reply, printing deltas as they arrive. Returns the final text,
/// or `None` when the request could not even start.
async fn stream_reply(chat: &ChatService, conversation: &Conversation) -> Option<String> {
    let mut stream = match chat.stream_conversation(conversation).await {
        Ok(stream) => stream,
        Err(e) => {
            println!("[error contacting model server] {e}");
            return None;
        },
    };

    print!("Maitre: ");
    std::io::stdout().flush().ok();

    let mut collected = String::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(chunk) => {
                if !chunk.content.is_empty() {
                    print!("{}", chunk.content);
                    std::io::stdout().flush().ok();
                    collected.push_str(&chunk.content);
                }
                if chunk.done {
                    break;
                }
            },
            Err(e) => {
                // Keep whatever arrived before the error
                println!("\n[stream interrupted] {e}");
                break;
            },
        }
    }

    Some(ChatService::normalize_reply(&collected))
}

/// Request a complete reply and print it in one piece
async fn complete_reply(chat: &ChatService, conversation: &Conversation) -> Option<String> {
    println!("Maitre: (thinking…)");

    match chat.continue_conversation(conversation).await {
        Ok(message) => {
            println!("Maitre: {}", message.content);
            Some(message.content)
        },
        Err(e) => {
            println!("[error contacting model server] {e}");
            None
        },
    }
}

async fn print_status(services: &SessionServices, persona: &Persona, conversation: &Conversation) {
    let memory_count = services.memory.list().await.map(|m| m.len()).unwrap_or(0);

    println!("👨‍🚀 Persona: {}", persona.name);
    println!("🤖 Model: {}", services.chat.current_model());
    if services.voice.is_enabled() {
        println!("🔊 Voice: {}", services.voice.voice_description());
    } else {
        println!("🔇 Voice: disabled");
    }
    println!("📝 Memories: {memory_count}");
    println!("💬 Messages this session: {}", conversation.message_count());
}

/// Rebuild the voice service around a new reference recording
async fn rebuild_voice(
    config: &AppConfig,
    reference: &std::path::Path,
    enabled: bool,
) -> anyhow::Result<VoiceReplyService> {
    let speech_config = ai_speech::SpeechConfig {
        provider: ai_speech::SpeechProvider::Cloned,
        reference_audio: Some(reference.to_path_buf()),
        ..config.speech.clone()
    };

    let adapter = SpeechAdapter::from_config(speech_config)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(VoiceReplyService::new(
        std::sync::Arc::new(adapter),
        enabled && config.speech.enabled,
    ))
}

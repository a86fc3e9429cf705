//! Maitre CLI
//!
//! Interactive voice pen-pal chat plus the tooling around it: one-shot
//! questions, speech tests, reference-sample preparation and server checks.

#![allow(clippy::print_stdout)]

mod chat_loop;
mod voice_tools;

use std::path::PathBuf;
use std::sync::Arc;

use application::{ChatService, MemoryService, VoiceReplyService};
use clap::{Parser, Subcommand};
use infrastructure::{
    AppConfig, JsonMemoryStore, JsonPersonaStore, NdjsonTranscriptLog, OllamaInferenceAdapter,
    SpeechAdapter, init_tracing,
};

/// Maitre CLI
#[derive(Parser)]
#[command(name = "maitre")]
#[command(author, version, about = "Maitre voice pen-pal companion", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session (the default)
    Chat {
        /// Do not speak replies
        #[arg(long)]
        no_voice: bool,

        /// Wait for complete replies instead of streaming tokens
        #[arg(long)]
        no_stream: bool,

        /// Persona file override
        #[arg(long)]
        persona: Option<PathBuf>,
    },

    /// Ask a single question and exit
    Ask {
        /// Message to send
        message: String,
    },

    /// Speak a line of text through the configured voice
    Speak {
        /// Text to speak
        text: String,
    },

    /// Reference-recording tooling
    Voice {
        #[command(subcommand)]
        command: VoiceCommands,
    },

    /// List models on the inference server
    Models,

    /// Check inference server health (exit code 0/1)
    Health,
}

#[derive(Subcommand)]
enum VoiceCommands {
    /// Probe a recording and report its suitability as a voice reference
    Check {
        /// Audio file to analyze
        file: PathBuf,
    },

    /// Normalize a recording into the prepared-sample format
    Prepare {
        /// Audio file to prepare
        file: PathBuf,

        /// Output path (defaults to voice_samples/prepared_voice.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&PathBuf>) -> AppConfig {
    let result = path.map_or_else(AppConfig::load, |p| AppConfig::load_from(p));
    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(log_filter_from_verbosity(cli.verbose));

    let mut config = load_config(cli.config.as_ref());

    match cli.command.unwrap_or(Commands::Chat {
        no_voice: false,
        no_stream: false,
        persona: None,
    }) {
        Commands::Chat {
            no_voice,
            no_stream,
            persona,
        } => {
            if let Some(path) = persona {
                config.storage.persona_path = path;
            }
            let options = chat_loop::ChatOptions {
                voice: !no_voice,
                streaming: !no_stream,
            };
            chat_loop::run(config, options).await?;
        },

        Commands::Ask { message } => {
            let inference = OllamaInferenceAdapter::new(config.inference.clone())
                .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?;
            let chat = ChatService::new(Arc::new(inference));

            let persona = JsonPersonaStore::new(config.storage.persona_path.clone());
            let system_prompt = match application::ports::PersonaStorePort::load(&persona).await {
                Ok(p) => p.system_prompt(),
                Err(_) => domain::Persona::default().system_prompt(),
            };

            let reply = chat
                .chat_with_system(&system_prompt, &message)
                .await
                .map_err(|e| anyhow::anyhow!("Chat failed: {e}"))?;

            println!("{}", reply.content);
            if let Some(latency) = reply.metadata.and_then(|m| m.latency_ms) {
                tracing::info!(latency_ms = latency, "Reply generated");
            }
        },

        Commands::Speak { text } => {
            let speech = SpeechAdapter::from_config(config.speech.clone())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to initialize speech: {e}"))?;
            let voice = VoiceReplyService::new(Arc::new(speech), true);

            println!("🔊 {}", voice.voice_description());
            if !voice.speak_reply(&text).await {
                anyhow::bail!("Speech failed (see logs)");
            }
        },

        Commands::Voice { command } => match command {
            VoiceCommands::Check { file } => {
                let suitable = voice_tools::check(&config.speech, &file).await?;
                if !suitable {
                    std::process::exit(1);
                }
            },
            VoiceCommands::Prepare { file, output } => {
                voice_tools::prepare(&config.speech, &file, output.as_deref()).await?;
            },
        },

        Commands::Models => {
            let inference = OllamaInferenceAdapter::new(config.inference.clone())
                .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?;
            let chat = ChatService::new(Arc::new(inference));

            let models = chat
                .list_available_models()
                .await
                .map_err(|e| anyhow::anyhow!("Could not list models: {e}"))?;

            println!("📦 Available models:");
            for model in models {
                println!("  {model}");
            }
        },

        Commands::Health => {
            let inference = OllamaInferenceAdapter::new(config.inference.clone())
                .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?;
            let chat = ChatService::new(Arc::new(inference));

            if chat.is_healthy().await {
                println!("✅ Model server is healthy ({})", chat.current_model());
            } else {
                println!("❌ Model server is unreachable at {}", config.inference.base_url);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Wire the full chat stack from configuration
pub(crate) async fn build_session(
    config: &AppConfig,
    voice_enabled: bool,
) -> anyhow::Result<chat_loop::SessionServices> {
    let inference = OllamaInferenceAdapter::new(config.inference.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize inference: {e}"))?;

    let speech = SpeechAdapter::from_config(config.speech.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech: {e}"))?;

    let voice_enabled = voice_enabled && config.speech.enabled;

    Ok(chat_loop::SessionServices {
        chat: ChatService::new(Arc::new(inference)),
        memory: MemoryService::new(Arc::new(JsonMemoryStore::new(
            config.storage.memories_path.clone(),
        ))),
        voice: VoiceReplyService::new(Arc::new(speech), voice_enabled),
        transcript: NdjsonTranscriptLog::new(config.storage.transcript_dir.clone()),
        persona_store: JsonPersonaStore::new(config.storage.persona_path.clone()),
    })
}

//! Chat loop slash commands
//!
//! Everything the REPL accepts besides plain chat. Parsing is pure so the
//! loop itself stays a thin dispatcher.

use std::path::PathBuf;

/// Help text printed by `/help` and on unknown commands
pub const HELP_TEXT: &str = "Commands: /help, /exit, /mem (list), /remember <note>, \
                             /clear_mem, /voice <file>, /status\n\
                             Chat normally otherwise.";

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// A plain chat turn
    Chat(String),
    /// `/help`
    Help,
    /// `/exit`
    Exit,
    /// `/mem` - list saved notes
    ListMemories,
    /// `/remember <note>` - save a note
    Remember(String),
    /// `/clear_mem` - delete all notes
    ClearMemories,
    /// `/status` - show session info
    Status,
    /// `/voice <file>` - switch the reference recording
    SetVoice(PathBuf),
    /// A slash command with missing or bad arguments; carries the usage hint
    Malformed(&'static str),
    /// An unrecognized slash command
    Unknown(String),
    /// Blank input
    Empty,
}

impl ChatCommand {
    /// Parse one line of user input
    pub fn parse(input: &str) -> Self {
        let text = input.trim();

        if text.is_empty() {
            return Self::Empty;
        }
        if !text.starts_with('/') {
            return Self::Chat(text.to_string());
        }

        match text {
            "/help" => return Self::Help,
            "/exit" => return Self::Exit,
            "/mem" => return Self::ListMemories,
            "/clear_mem" => return Self::ClearMemories,
            "/status" => return Self::Status,
            _ => {},
        }

        if let Some(rest) = text.strip_prefix("/remember") {
            let note = rest.trim();
            return if note.is_empty() {
                Self::Malformed("Usage: /remember <note>")
            } else {
                Self::Remember(note.to_string())
            };
        }

        if let Some(rest) = text.strip_prefix("/voice") {
            let path = rest.trim();
            return if path.is_empty() {
                Self::Malformed("Usage: /voice <audio-file>")
            } else {
                Self::SetVoice(PathBuf::from(path))
            };
        }

        Self::Unknown(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_chat() {
        assert_eq!(
            ChatCommand::parse("how was your day?"),
            ChatCommand::Chat("how was your day?".to_string())
        );
    }

    #[test]
    fn chat_text_is_trimmed() {
        assert_eq!(
            ChatCommand::parse("  hello  "),
            ChatCommand::Chat("hello".to_string())
        );
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(ChatCommand::parse(""), ChatCommand::Empty);
        assert_eq!(ChatCommand::parse("   "), ChatCommand::Empty);
    }

    #[test]
    fn bare_commands_parse() {
        assert_eq!(ChatCommand::parse("/help"), ChatCommand::Help);
        assert_eq!(ChatCommand::parse("/exit"), ChatCommand::Exit);
        assert_eq!(ChatCommand::parse("/mem"), ChatCommand::ListMemories);
        assert_eq!(ChatCommand::parse("/clear_mem"), ChatCommand::ClearMemories);
        assert_eq!(ChatCommand::parse("/status"), ChatCommand::Status);
    }

    #[test]
    fn remember_keeps_note_text() {
        assert_eq!(
            ChatCommand::parse("/remember the hatch sticks"),
            ChatCommand::Remember("the hatch sticks".to_string())
        );
    }

    #[test]
    fn remember_without_note_shows_usage() {
        assert_eq!(
            ChatCommand::parse("/remember"),
            ChatCommand::Malformed("Usage: /remember <note>")
        );
        assert_eq!(
            ChatCommand::parse("/remember    "),
            ChatCommand::Malformed("Usage: /remember <note>")
        );
    }

    #[test]
    fn voice_takes_a_path() {
        assert_eq!(
            ChatCommand::parse("/voice voice_samples/mom.wav"),
            ChatCommand::SetVoice(PathBuf::from("voice_samples/mom.wav"))
        );
    }

    #[test]
    fn voice_without_path_shows_usage() {
        assert_eq!(
            ChatCommand::parse("/voice"),
            ChatCommand::Malformed("Usage: /voice <audio-file>")
        );
    }

    #[test]
    fn unknown_slash_command() {
        assert_eq!(
            ChatCommand::parse("/reboot"),
            ChatCommand::Unknown("/reboot".to_string())
        );
    }

    #[test]
    fn slash_in_the_middle_is_chat() {
        assert_eq!(
            ChatCommand::parse("either/or is fine"),
            ChatCommand::Chat("either/or is fine".to_string())
        );
    }

    #[test]
    fn help_text_lists_every_command() {
        for cmd in ["/help", "/exit", "/mem", "/remember", "/clear_mem", "/voice", "/status"] {
            assert!(HELP_TEXT.contains(cmd), "help text is missing {cmd}");
        }
    }
}

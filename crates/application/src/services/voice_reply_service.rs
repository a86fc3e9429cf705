//! Voice reply service - Speaking assistant replies
//!
//! Speech is decoration on top of the chat loop: when synthesis fails the
//! reply was already printed, so failures are logged and swallowed instead
//! of surfacing to the user.

use std::{fmt, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{ports::SpeechPort, services::chat_service::EMPTY_REPLY_PLACEHOLDER};

/// Service that speaks replies and never interrupts the loop
pub struct VoiceReplyService {
    speech: Arc<dyn SpeechPort>,
    enabled: bool,
}

impl fmt::Debug for VoiceReplyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceReplyService")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl VoiceReplyService {
    /// Create a new voice reply service
    pub fn new(speech: Arc<dyn SpeechPort>, enabled: bool) -> Self {
        Self { speech, enabled }
    }

    /// Whether replies are spoken at all
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Description of the active voice
    pub fn voice_description(&self) -> String {
        self.speech.voice_description()
    }

    /// Speak a reply. Returns `true` when the text was actually spoken.
    ///
    /// Empty replies and the placeholder are skipped; synthesis errors are
    /// logged and swallowed.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn speak_reply(&self, text: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let text = text.trim();
        if text.is_empty() || text == EMPTY_REPLY_PLACEHOLDER {
            debug!("Skipping speech for empty reply");
            return false;
        }

        match self.speech.speak(text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Speech failed, continuing without voice");
                false
            },
        }
    }
}

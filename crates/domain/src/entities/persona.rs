//! Persona entity - Profile of the person the companion writes to
//!
//! A persona file describes the correspondent (the astronaut) and how the
//! companion should address them. The system prompt is assembled from these
//! fields in a fixed order so prompts stay stable across sessions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DomainError;

/// Default greeting spoken at the start of a session
const DEFAULT_GREETING: &str = "hello commander how are you feeling today";

/// Profile of the correspondent and the companion's tone towards them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Name of the astronaut the companion writes to
    #[serde(rename = "astronaut_name", default = "default_name")]
    pub name: String,

    /// Free-form mission details (destination, duration, role, ...)
    #[serde(default)]
    pub mission: Map<String, Value>,

    /// Topics and things the astronaut enjoys
    #[serde(default)]
    pub likes: Vec<String>,

    /// Free-form family details used to personalize conversation
    #[serde(default)]
    pub family: Map<String, Value>,

    /// Backstory paragraph, included verbatim when non-empty
    #[serde(default)]
    pub backstory: String,

    /// Tone guidance bullet points
    #[serde(default)]
    pub tone_guidelines: Vec<String>,

    /// Topics the companion must steer away from
    #[serde(default)]
    pub taboo_topics: Vec<String>,

    /// Override for the spoken session greeting
    #[serde(default)]
    pub greeting: Option<String>,
}

fn default_name() -> String {
    "Astronaut".to_string()
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: "Commander Sarah".to_string(),
            mission: Map::new(),
            likes: Vec::new(),
            family: Map::new(),
            backstory: String::new(),
            tone_guidelines: Vec::new(),
            taboo_topics: Vec::new(),
            greeting: None,
        }
    }
}

impl Persona {
    /// Reject personas that cannot produce a usable prompt
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidPersona(
                "astronaut_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the system prompt for this persona.
    ///
    /// Line order is fixed: role preamble, safety deferral, profile line,
    /// then optional backstory/tone/taboo lines, then the closing style line.
    pub fn system_prompt(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(
            "You are Maitre, a warm, supportive pen-pal companion for an astronaut.".to_string(),
        );
        parts.push(
            "Your role is to chat casually, listen actively, and keep conversations engaging \
             and empathetic."
                .to_string(),
        );
        parts.push(
            "Do not provide medical, safety-critical, or operational instructions. If asked, \
             gently defer."
                .to_string(),
        );

        parts.push(format!(
            "Astronaut profile: name={}; mission={}; likes={}; family={}.",
            self.name,
            Value::Object(self.mission.clone()),
            Value::from(self.likes.clone()),
            Value::Object(self.family.clone()),
        ));

        if !self.backstory.is_empty() {
            parts.push(format!("Backstory: {}", self.backstory));
        }
        if !self.tone_guidelines.is_empty() {
            parts.push(format!("Tone: {}", self.tone_guidelines.join(", ")));
        }
        if !self.taboo_topics.is_empty() {
            parts.push(format!("Avoid topics: {}", self.taboo_topics.join(", ")));
        }

        parts.push(
            "Prefer short paragraphs. Ask one thoughtful follow-up question when it helps \
             connection."
                .to_string(),
        );

        parts.join("\n")
    }

    /// Greeting spoken and printed when a session starts
    pub fn greeting_line(&self) -> &str {
        self.greeting.as_deref().unwrap_or(DEFAULT_GREETING)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_persona() -> Persona {
        serde_json::from_value(json!({
            "astronaut_name": "Commander Sarah",
            "mission": {"destination": "Mars", "duration_months": 18},
            "likes": ["jazz", "chess"],
            "family": {"partner": "Alex"},
            "backstory": "Grew up near the coast.",
            "tone_guidelines": ["warm", "curious"],
            "taboo_topics": ["reentry risks"]
        }))
        .unwrap()
    }

    #[test]
    fn prompt_starts_with_role_preamble() {
        let prompt = sample_persona().system_prompt();
        assert!(prompt.starts_with("You are Maitre, a warm, supportive pen-pal companion"));
    }

    #[test]
    fn prompt_contains_profile_fields() {
        let prompt = sample_persona().system_prompt();
        assert!(prompt.contains("name=Commander Sarah"));
        assert!(prompt.contains("jazz"));
        assert!(prompt.contains("Mars"));
        assert!(prompt.contains("Alex"));
    }

    #[test]
    fn optional_lines_included_when_present() {
        let prompt = sample_persona().system_prompt();
        assert!(prompt.contains("Backstory: Grew up near the coast."));
        assert!(prompt.contains("Tone: warm, curious"));
        assert!(prompt.contains("Avoid topics: reentry risks"));
    }

    #[test]
    fn optional_lines_skipped_when_empty() {
        let persona = Persona::default();
        let prompt = persona.system_prompt();
        assert!(!prompt.contains("Backstory:"));
        assert!(!prompt.contains("Tone:"));
        assert!(!prompt.contains("Avoid topics:"));
    }

    #[test]
    fn prompt_ends_with_style_line() {
        let prompt = sample_persona().system_prompt();
        assert!(prompt.ends_with("Ask one thoughtful follow-up question when it helps connection."));
    }

    #[test]
    fn greeting_falls_back_to_default() {
        assert_eq!(
            Persona::default().greeting_line(),
            "hello commander how are you feeling today"
        );
    }

    #[test]
    fn greeting_override_wins() {
        let persona = Persona {
            greeting: Some("good morning from mission support".to_string()),
            ..Persona::default()
        };
        assert_eq!(persona.greeting_line(), "good morning from mission support");
    }

    #[test]
    fn minimal_persona_deserializes_with_defaults() {
        let persona: Persona = serde_json::from_str("{}").unwrap();
        assert_eq!(persona.name, "Astronaut");
        assert!(persona.likes.is_empty());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let persona = Persona {
            name: "   ".to_string(),
            ..Persona::default()
        };
        assert!(persona.validate().is_err());
    }
}

//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Persona profile is malformed or unusable
    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_message() {
        let err = DomainError::not_found("Persona", "astronaut");
        assert_eq!(err.to_string(), "Persona not found: astronaut");
    }

    #[test]
    fn invalid_persona_error_message() {
        let err = DomainError::InvalidPersona("empty name".to_string());
        assert_eq!(err.to_string(), "Invalid persona: empty name");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("rate out of range".to_string());
        assert_eq!(err.to_string(), "Validation failed: rate out of range");
    }
}

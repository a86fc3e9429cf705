//! Persona profile store - JSON file

use std::path::PathBuf;

use application::{error::ApplicationError, ports::PersonaStorePort};
use async_trait::async_trait;
use domain::Persona;
use tracing::{debug, instrument};

/// Loads the persona profile from a JSON file
#[derive(Debug, Clone)]
pub struct JsonPersonaStore {
    path: PathBuf,
}

impl JsonPersonaStore {
    /// Create a store reading from the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PersonaStorePort for JsonPersonaStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Persona, ApplicationError> {
        if !self.path.exists() {
            return Err(ApplicationError::Storage(format!(
                "Persona file not found at {}. Please create it.",
                self.path.display()
            )));
        }

        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ApplicationError::Storage(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))
        })?;

        let persona: Persona = serde_json::from_str(&text).map_err(|e| {
            ApplicationError::Storage(format!(
                "Invalid persona file {}: {e}",
                self.path.display()
            ))
        })?;

        persona.validate()?;

        debug!(name = %persona.name, "Loaded persona");
        Ok(persona)
    }
}

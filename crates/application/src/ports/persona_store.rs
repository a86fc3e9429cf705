//! Persona store port - Loading the persona profile

use async_trait::async_trait;
use domain::Persona;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persona loading
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PersonaStorePort: Send + Sync {
    /// Load the configured persona profile
    async fn load(&self) -> Result<Persona, ApplicationError>;
}

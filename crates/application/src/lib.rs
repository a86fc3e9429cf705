//! Application layer - Use cases and orchestration
//!
//! Owns the chat loop's behavior without knowing how anything is stored,
//! synthesized or served: ports describe what the layer needs, services
//! orchestrate domain objects across them.

pub mod commands;
pub mod error;
pub mod ports;
pub mod services;

pub use commands::{ChatCommand, HELP_TEXT};
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

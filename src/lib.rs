//! Oravox - voice assistant backend library
//!
//! This library provides the core functionality for the Oravox backend:
//! it receives spoken-language requests from a voice platform, forwards
//! the conversational context to the Gemini generation API, and returns
//! a speech-safe answer while maintaining short-term conversational
//! memory within a session.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `conversation`: bounded transcript management (instruction pair,
//!   trimming)
//! - `speech`: speech output sanitization
//! - `providers`: generation provider abstraction and the Gemini
//!   implementation
//! - `skill`: request envelope and intent dispatch
//! - `session`: per-session attributes exchanged with the platform
//! - `server`: the webhook router
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use oravox::config::Config;
//! use oravox::providers::create_provider;
//! use oravox::skill::SkillHandler;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load("config.yaml", &Default::default())?;
//! config.validate()?;
//!
//! let provider = create_provider(&config.provider)?;
//! let handler = SkillHandler::new(Arc::from(provider), config.assistant.clone());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod providers;
pub mod server;
pub mod session;
pub mod skill;
pub mod speech;

// Re-export commonly used types
pub use config::Config;
pub use conversation::{Role, Transcript, Turn};
pub use error::{OravoxError, Result};
pub use session::SessionAttributes;
pub use skill::{SkillHandler, SkillRequest, SkillResponse};
pub use speech::sanitize_for_speech;

#[cfg(test)]
pub mod test_utils;

//! Provider module for Oravox
//!
//! This module contains the generation provider abstraction, the Gemini
//! implementation, and an in-process fake for tests.

pub mod base;
pub mod fake;
pub mod gemini;

pub use base::Provider;
pub use fake::FakeProvider;
pub use gemini::{Content, GeminiProvider, Part, EMPTY_COMPLETION_FALLBACK};

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(config.gemini.clone())?)),
        other => Err(crate::error::OravoxError::Provider(format!(
            "Unknown provider type: {}",
            other
        ))
        .into()),
    }
}

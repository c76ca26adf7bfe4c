//! Base provider trait for Oravox
//!
//! This module defines the Provider trait that generation backends must
//! implement. The backend sends the whole transcript and receives the
//! collated answer text; streaming is not part of the contract.

use crate::conversation::Transcript;
use crate::error::Result;
use async_trait::async_trait;

/// Provider trait for generation backends
///
/// A provider turns a conversation transcript into one answer string
/// with a single upstream call. Implementations collate multi-part
/// payloads themselves and substitute a fixed fallback for empty ones,
/// so callers only ever distinguish success from failure.
///
/// # Examples
///
/// ```
/// use oravox::conversation::Transcript;
/// use oravox::error::Result;
/// use oravox::providers::Provider;
/// use async_trait::async_trait;
///
/// struct CannedProvider;
///
/// #[async_trait]
/// impl Provider for CannedProvider {
///     async fn generate(&self, _transcript: &Transcript) -> Result<String> {
///         Ok("A canned answer.".to_string())
///     }
/// }
/// ```
impl std::fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Provider")
    }
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Generates an answer for the given transcript
    ///
    /// # Arguments
    ///
    /// * `transcript` - Conversation history, oldest turn first
    ///
    /// # Returns
    ///
    /// Returns the answer text. An upstream payload with no usable text
    /// is reported as a fixed fallback string, not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the upstream call fails or the response cannot
    /// be parsed
    async fn generate(&self, transcript: &Transcript) -> Result<String>;
}

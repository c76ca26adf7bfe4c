//! Gemini provider implementation for Oravox
//!
//! This module implements the Provider trait for the Gemini
//! `generateContent` API: one non-streaming POST per request, carrying
//! the whole transcript and the generation settings, answered by a
//! candidate list whose first entry is collated into the answer text.

use crate::config::GeminiConfig;
use crate::conversation::{Role, Transcript, Turn};
use crate::error::{OravoxError, Result};
use crate::providers::Provider;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base for the generation endpoint
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Fallback answer for an upstream payload with no usable text
pub const EMPTY_COMPLETION_FALLBACK: &str = "I couldn't generate a response.";

/// One transcript turn in wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Role of the turn ("user" or "model")
    pub role: Role,
    /// Text fragments making up the turn
    pub parts: Vec<Part>,
}

/// A text fragment of a wire-format turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// The fragment text
    #[serde(default)]
    pub text: String,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

/// Request structure for the generation endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

/// Generation settings sent with every request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Response structure from the generation endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// One generation candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

/// The content payload of a candidate
#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Gemini API provider
///
/// This provider connects to the Gemini `generateContent` endpoint. The
/// API key travels as a `key` query parameter; a missing or invalid key
/// therefore surfaces as an upstream HTTP failure on the first call,
/// never at construction time.
///
/// # Examples
///
/// ```no_run
/// use oravox::config::GeminiConfig;
/// use oravox::conversation::Transcript;
/// use oravox::providers::{GeminiProvider, Provider};
///
/// # async fn example() -> oravox::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: "secret".to_string(),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let transcript = Transcript::seeded("Answer briefly.", "Understood.");
/// let answer = provider.generate(&transcript).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration containing key, model, and
    ///   generation settings
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("oravox/0.1.0")
            .build()
            .map_err(|e| OravoxError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized Gemini provider: model={}", config.model);

        Ok(Self { client, config })
    }

    /// Build the generation endpoint URL, honoring `api_base` overrides
    fn endpoint_url(&self) -> String {
        let base = self
            .config
            .api_base
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/');
        format!("{}/v1beta/models/{}:generateContent", base, self.config.model)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, transcript: &Transcript) -> Result<String> {
        let request = GenerateContentRequest {
            contents: transcript.turns().iter().map(Content::from).collect(),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::debug!("Sending Gemini request: {} turns", request.contents.len());

        let response = self
            .client
            .post(self.endpoint_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                OravoxError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(OravoxError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            OravoxError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        Ok(collate_text(payload))
    }
}

/// Concatenate the first candidate's part texts into the answer
///
/// A response with no candidates, no content, or only whitespace text
/// collates to the fixed fallback string rather than an error.
fn collate_text(payload: GenerateContentResponse) -> String {
    let text: String = payload
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        tracing::warn!("Gemini response contained no usable text, using fallback");
        EMPTY_COMPLETION_FALLBACK.to_string()
    } else {
        text.to_string()
    }
}

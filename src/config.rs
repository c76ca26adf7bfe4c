//! Configuration management for Oravox
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{OravoxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Oravox
///
/// This structure holds all configuration needed for the backend,
/// including provider settings, assistant behavior, and the serving
/// address.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Provider configuration (Gemini)
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Assistant behavior configuration
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Provider configuration
///
/// Specifies which generation provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the generation endpoint
    ///
    /// A missing or invalid key is not a configuration error; it
    /// surfaces as an HTTP failure on the first upstream call.
    #[serde(default)]
    pub api_key: String,

    /// Model to use for generation
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Optional API base URL override (useful for tests and local mocks)
    ///
    /// When set, this base is used to build the `generateContent`
    /// endpoint, which allows tests to point the provider at a mock
    /// server.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Sampling temperature sent with every request
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token cap sent with every request
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Timeout for the upstream call (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    200
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            api_base: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Assistant behavior configuration
///
/// Settings governing the instruction pair seeded into every
/// conversation, how much history is retained, and the speech output
/// ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// System instructions carried by the synthetic first user turn
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Synthetic model acknowledgment completing the instruction pair
    #[serde(default = "default_system_ack")]
    pub system_ack: String,

    /// Number of recent exchanges (user/model pairs) retained beyond
    /// the instruction pair
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    /// Hard ceiling on spoken output length, in characters
    #[serde(default = "default_max_speech_chars")]
    pub max_speech_chars: usize,
}

fn default_system_prompt() -> String {
    "You are a helpful voice assistant called Oravox. \
     Keep answers concise (2-4 sentences) and natural for spoken delivery. \
     Avoid bullet points, markdown, asterisks, or special characters. \
     Use plain spoken English. If asked to elaborate, give more detail \
     but stay under 5 sentences."
        .to_string()
}

fn default_system_ack() -> String {
    "Understood. I will keep my answers concise and voice-friendly. Ask me anything.".to_string()
}

fn default_max_history_turns() -> usize {
    4
}

fn default_max_speech_chars() -> usize {
    6000
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            system_ack: default_system_ack(),
            max_history_turns: default_max_history_turns(),
            max_speech_chars: default_max_speech_chars(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the skill endpoint to
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:8035".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OravoxError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| OravoxError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("ORAVOX_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(api_key) = std::env::var("ORAVOX_GEMINI_API_KEY") {
            self.provider.gemini.api_key = api_key;
        }

        if let Ok(model) = std::env::var("ORAVOX_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(listen) = std::env::var("ORAVOX_LISTEN") {
            self.server.listen = listen;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(listen) = &cli.listen {
            self.server.listen = listen.clone();
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set. The API key is not
    /// checked here: key problems surface as upstream HTTP failures.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(OravoxError::Config("Provider type cannot be empty".to_string()).into());
        }

        let valid_providers = ["gemini"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(OravoxError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.assistant.max_history_turns == 0 {
            return Err(OravoxError::Config(
                "assistant.max_history_turns must be greater than 0".to_string(),
            )
            .into());
        }

        if self.assistant.max_speech_chars == 0 {
            return Err(OravoxError::Config(
                "assistant.max_speech_chars must be greater than 0".to_string(),
            )
            .into());
        }

        if self.assistant.system_prompt.trim().is_empty() {
            return Err(OravoxError::Config(
                "assistant.system_prompt cannot be empty".to_string(),
            )
            .into());
        }

        if !(0.0..=2.0).contains(&self.provider.gemini.temperature) {
            return Err(OravoxError::Config(
                "gemini.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if self.provider.gemini.max_output_tokens == 0 {
            return Err(OravoxError::Config(
                "gemini.max_output_tokens must be greater than 0".to_string(),
            )
            .into());
        }

        if self.provider.gemini.request_timeout_seconds == 0 {
            return Err(OravoxError::Config(
                "gemini.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.listen.is_empty() {
            return Err(OravoxError::Config("server.listen cannot be empty".to_string()).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.provider_type, "gemini");
        assert_eq!(config.provider.gemini.model, "gemini-2.5-flash-lite");
        assert_eq!(config.assistant.max_history_turns, 4);
        assert_eq!(config.assistant.max_speech_chars, 6000);
        assert_eq!(config.server.listen, "127.0.0.1:8035");
    }

    #[test]
    fn test_config_validation_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_accepts_empty_api_key() {
        // Key problems must surface as upstream failures, never at startup.
        let config = Config::default();
        assert!(config.provider.gemini.api_key.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_provider() {
        let mut config = Config::default();
        config.provider.provider_type = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_provider() {
        let mut config = Config::default();
        config.provider.provider_type = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_history_turns() {
        let mut config = Config::default();
        config.assistant.max_history_turns = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_speech_chars() {
        let mut config = Config::default();
        config.assistant.max_speech_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_system_prompt() {
        let mut config = Config::default();
        config.assistant.system_prompt = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_temperature_out_of_range() {
        let mut config = Config::default();
        config.provider.gemini.temperature = 2.5;
        assert!(config.validate().is_err());

        config.provider.gemini.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_max_output_tokens() {
        let mut config = Config::default();
        config.provider.gemini.max_output_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.provider.gemini.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
provider:
  type: gemini
  gemini:
    api_key: test-key
    model: gemini-2.5-pro
    temperature: 0.3
    max_output_tokens: 400

assistant:
  system_prompt: "Answer briefly."
  max_history_turns: 6

server:
  listen: 0.0.0.0:9000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.provider.gemini.api_key, "test-key");
        assert_eq!(config.provider.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.provider.gemini.temperature, 0.3);
        assert_eq!(config.provider.gemini.max_output_tokens, 400);
        assert_eq!(config.assistant.system_prompt, "Answer briefly.");
        assert_eq!(config.assistant.max_history_turns, 6);
        // Omitted fields fall back to defaults
        assert_eq!(config.assistant.max_speech_chars, 6000);
        assert_eq!(config.server.listen, "0.0.0.0:9000");
    }

    #[test]
    fn test_config_from_yaml_empty_sections() {
        let config: Config = serde_yaml::from_str("provider:\n  type: gemini\n").unwrap();
        assert_eq!(config.assistant.max_history_turns, 4);
        assert_eq!(config.provider.gemini.model, "gemini-2.5-flash-lite");
    }

    #[test]
    #[serial]
    fn test_env_var_overrides() {
        std::env::set_var("ORAVOX_GEMINI_API_KEY", "env-key");
        std::env::set_var("ORAVOX_GEMINI_MODEL", "env-model");
        std::env::set_var("ORAVOX_LISTEN", "0.0.0.0:1234");

        let mut config = Config::default();
        config.apply_env_vars();

        assert_eq!(config.provider.gemini.api_key, "env-key");
        assert_eq!(config.provider.gemini.model, "env-model");
        assert_eq!(config.server.listen, "0.0.0.0:1234");

        std::env::remove_var("ORAVOX_GEMINI_API_KEY");
        std::env::remove_var("ORAVOX_GEMINI_MODEL");
        std::env::remove_var("ORAVOX_LISTEN");
    }

    #[test]
    fn test_cli_override_listen() {
        let cli = crate::cli::Cli {
            listen: Some("127.0.0.1:7000".to_string()),
            ..Default::default()
        };
        let mut config = Config::default();
        config.apply_cli_overrides(&cli);
        assert_eq!(config.server.listen, "127.0.0.1:7000");
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        let cli = crate::cli::Cli::default();
        let config = Config::load("/nonexistent/config.yaml", &cli).unwrap();
        assert_eq!(config.provider.provider_type, "gemini");
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "assistant:\n  max_history_turns: 2\n").unwrap();

        let cli = crate::cli::Cli::default();
        let config = Config::load(path.to_str().unwrap(), &cli).unwrap();
        assert_eq!(config.assistant.max_history_turns, 2);
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "provider: [not a mapping").unwrap();

        let cli = crate::cli::Cli::default();
        assert!(Config::load(path.to_str().unwrap(), &cli).is_err());
    }
}

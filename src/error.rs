//! Error types for Oravox
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Oravox operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, upstream generation calls, and skill request
/// handling.
#[derive(Error, Debug)]
pub enum OravoxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (upstream API calls, malformed payloads)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Skill request handling errors (unroutable requests)
    #[error("Skill error: {0}")]
    Skill(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Oravox operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

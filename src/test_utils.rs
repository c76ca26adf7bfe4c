//! Test utilities for Oravox
//!
//! This module provides common test utilities including temporary
//! config file management and canned configurations.

use crate::config::{AssistantConfig, Config};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a config file with the given YAML content
///
/// # Arguments
///
/// * `dir` - Directory to create the file in
/// * `content` - YAML content to write
///
/// # Returns
///
/// Returns the path to the created file
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).expect("Failed to write test config");
    path
}

/// Create a test configuration with default values
///
/// # Returns
///
/// Returns a Config instance suitable for testing
pub fn test_config() -> Config {
    Config::default()
}

/// Create an assistant configuration with a short, predictable seed pair
pub fn test_assistant_config() -> AssistantConfig {
    AssistantConfig {
        system_prompt: "Answer briefly.".to_string(),
        system_ack: "Understood.".to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_config_file() {
        let dir = temp_dir();
        let path = write_config_file(&dir, "provider:\n  type: gemini\n");
        assert!(path.exists());
    }

    #[test]
    fn test_test_config_is_valid() {
        assert!(test_config().validate().is_ok());
    }
}

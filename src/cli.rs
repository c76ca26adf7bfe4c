//! Command-line interface definition for Oravox
//!
//! This module defines the CLI structure using clap's derive API. The
//! backend has a single serve role, so there are no subcommands; the
//! flags cover the config file location and the bind address.

use clap::Parser;

/// Oravox - voice assistant backend
///
/// Serves the voice platform webhook and relays conversational context
/// to the Gemini generation API.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "oravox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind the skill endpoint to (overrides config)
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

//! Oravox - voice assistant backend
//!
//! Main entry point: loads configuration, builds the generation
//! provider, and serves the skill webhook.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use oravox::cli::Cli;
use oravox::config::Config;
use oravox::providers::create_provider;
use oravox::server;
use oravox::skill::SkillHandler;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Build the provider and the skill handler
    let provider = create_provider(&config.provider)?;
    let handler = SkillHandler::new(Arc::from(provider), config.assistant.clone());

    // Serve the webhook
    let listener = tokio::net::TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    tracing::info!("Listening on {}", config.server.listen);

    axum::serve(listener, server::router(Arc::new(handler)))
        .await
        .context("Server error")?;

    Ok(())
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "oravox=debug" } else { "oravox=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

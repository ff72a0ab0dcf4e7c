//! Process startup: tracing, configuration, pipeline construction

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use leadscore_common::config::{
    default_config_path, load_dotenv, load_toml_config, CliOverrides, ServiceConfig, TomlConfig,
    DEFAULT_LOG_LEVEL,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::services::{LeadAnalyzer, LeadScorer, OpenRouterClient, SentimentScorer};

/// Load `.env`, initialise tracing, and resolve configuration
///
/// `RUST_LOG` wins over the TOML `log_level`. A missing API key is returned as
/// an error; the caller must not start serving.
pub fn init(process_name: &str, cli: &CliOverrides) -> Result<ServiceConfig> {
    let dotenv_path = load_dotenv();

    let toml_path: Option<PathBuf> = cli.config_path.clone().or_else(default_config_path);
    let toml_config = match &toml_path {
        Some(path) => load_toml_config(path),
        None => Ok(TomlConfig::default()),
    };

    let log_level = toml_config
        .as_ref()
        .map(TomlConfig::log_level)
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // stdout carries command output (score-leads --json); logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Build identification goes out before anything that can fail or block
    info!(
        "Starting {} v{} [{}] built {} ({})",
        process_name,
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let toml_config = toml_config.context("Failed to load config file")?;
    let config = ServiceConfig::resolve_with(cli, &toml_config)
        .context("Failed to resolve configuration")?;

    info!(
        model = %config.model,
        base_url = %config.base_url,
        max_attempts = config.analysis.max_attempts,
        retry_delay_ms = config.analysis.retry_delay.as_millis() as u64,
        "Configuration resolved"
    );

    Ok(config)
}

/// Connect the provider client and assemble the scoring pipeline
pub async fn build_scorer(config: &ServiceConfig) -> Result<LeadScorer> {
    let client = OpenRouterClient::connect(config)
        .await
        .context("Failed to initialize text-generation client")?;

    let analyzer = LeadAnalyzer::from_settings(Arc::new(client), &config.model, &config.analysis);

    Ok(LeadScorer::new(SentimentScorer::new(), analyzer))
}

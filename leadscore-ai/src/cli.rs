//! Command-line arguments shared by the service and the scoring harness

use std::path::PathBuf;

use clap::Args;
use leadscore_common::config::CliOverrides;

/// Provider and config overrides
///
/// Unset flags fall through to environment variables, then the TOML file,
/// then compiled defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Text-generation provider API key (else OPENROUTER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Provider base URL (else OPENROUTER_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Model identifier (else LEADSCORE_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// TOML config file (default: <config dir>/leadscore/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the provider connectivity probe at startup
    #[arg(long)]
    pub skip_probe: bool,
}

impl ProviderArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            host: None,
            port: None,
            skip_probe: self.skip_probe,
            config_path: self.config.clone(),
        }
    }
}

//! Configuration loading and resolution
//!
//! Every setting is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The provider API key has no compiled default. If no tier supplies a usable
//! key, resolution fails with [`Error::Config`] and the service must not start.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable holding the text-generation provider API key
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Environment variable overriding the provider base URL
pub const BASE_URL_ENV: &str = "OPENROUTER_BASE_URL";
/// Environment variable overriding the model identifier
pub const MODEL_ENV: &str = "LEADSCORE_MODEL";
/// Environment variable overriding the listen host
pub const HOST_ENV: &str = "LEADSCORE_HOST";
/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";
/// Environment variable disabling the startup connectivity probe
pub const SKIP_PROBE_ENV: &str = "LEADSCORE_SKIP_PROBE";

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 2000;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// On-disk TOML configuration
///
/// Every field is optional. Missing fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    /// Outbound request timeout. Unset means the HTTP client default.
    pub request_timeout_secs: Option<u64>,
    pub startup_probe: Option<bool>,
    pub analysis: AnalysisToml,
}

impl TomlConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// `[analysis]` table of the TOML configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisToml {
    pub max_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Values supplied on the command line (highest priority tier)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub skip_probe: bool,
    /// Explicit TOML file. When absent the platform default path is used.
    pub config_path: Option<PathBuf>,
}

/// Lead analysis tuning
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Option<Duration>,
    pub startup_probe: bool,
    pub analysis: AnalysisSettings,
}

impl ServiceConfig {
    /// Resolve configuration from CLI overrides, the environment and the TOML file
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let toml_path = cli.config_path.clone().or_else(default_config_path);
        let toml_config = match toml_path {
            Some(path) => load_toml_config(&path)?,
            None => TomlConfig::default(),
        };
        Self::resolve_with(cli, &toml_config)
    }

    /// Resolve configuration against an already-loaded TOML config
    pub fn resolve_with(cli: &CliOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let api_key = resolve_api_key(cli.api_key.as_deref(), toml_config.api_key.as_deref())?;

        let base_url = pick(
            cli.base_url.clone(),
            BASE_URL_ENV,
            toml_config.base_url.clone(),
            DEFAULT_BASE_URL,
        );
        let base_url = base_url.trim_end_matches('/').to_string();

        let model = pick(cli.model.clone(), MODEL_ENV, toml_config.model.clone(), DEFAULT_MODEL);
        let host = pick(cli.host.clone(), HOST_ENV, toml_config.host.clone(), DEFAULT_HOST);

        let port = match cli.port {
            Some(port) => port,
            None => match env_value(PORT_ENV) {
                Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                    Error::Config(format!("{} must be a port number, got {:?}: {}", PORT_ENV, raw, e))
                })?,
                None => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let startup_probe = if cli.skip_probe || env_flag(SKIP_PROBE_ENV) {
            false
        } else {
            toml_config.startup_probe.unwrap_or(true)
        };

        let analysis = resolve_analysis(&toml_config.analysis)?;

        Ok(Self {
            api_key,
            base_url,
            model,
            host,
            port,
            request_timeout: toml_config.request_timeout_secs.map(Duration::from_secs),
            startup_probe,
            analysis,
        })
    }

    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve the provider API key
///
/// **Priority:** CLI → ENV → TOML. No default exists.
pub fn resolve_api_key(cli_key: Option<&str>, toml_key: Option<&str>) -> Result<String> {
    if let Some(key) = cli_key.filter(|k| is_valid_key(k)) {
        info!("Provider API key loaded from command line");
        return Ok(key.trim().to_string());
    }

    if let Some(key) = env_value(API_KEY_ENV) {
        info!("Provider API key loaded from environment variable");
        return Ok(key.trim().to_string());
    }

    if let Some(key) = toml_key.filter(|k| is_valid_key(k)) {
        info!("Provider API key loaded from TOML config");
        return Ok(key.trim().to_string());
    }

    Err(Error::Config(format!(
        "{} is not set. Configure it using one of:\n\
         1. Command line: --api-key <key>\n\
         2. Environment: {}=your-key-here (a .env file in the working directory is honoured)\n\
         3. TOML config: api_key = \"your-key\"",
        API_KEY_ENV, API_KEY_ENV
    )))
}

fn resolve_analysis(section: &AnalysisToml) -> Result<AnalysisSettings> {
    let defaults = AnalysisSettings::default();

    let max_attempts = section.max_attempts.unwrap_or(defaults.max_attempts);
    if max_attempts == 0 {
        return Err(Error::Config("analysis.max_attempts must be at least 1".to_string()));
    }

    let temperature = section.temperature.unwrap_or(defaults.temperature);
    if !(0.0..=2.0).contains(&temperature) {
        return Err(Error::Config(format!(
            "analysis.temperature must be within [0, 2], got {}",
            temperature
        )));
    }

    Ok(AnalysisSettings {
        max_attempts,
        retry_delay: section
            .retry_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_delay),
        max_tokens: section.max_tokens.unwrap_or(defaults.max_tokens),
        temperature,
    })
}

/// Load the TOML config file
///
/// A missing file is not fatal: a warning is logged and the defaults are
/// returned. Any other read failure, or a file that does not parse, is an
/// error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Config file {} not found, using environment and defaults",
                path.display()
            );
            return Ok(TomlConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    info!("Loaded config file {}", path.display());
    Ok(config)
}

/// Platform config file location: `<config_dir>/leadscore/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("leadscore").join("config.toml"))
}

/// Load a `.env` file from the working directory (or its parents) if present
///
/// Returns the path that was loaded. Runs before tracing is initialised, so the
/// caller is responsible for logging the outcome.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

fn pick(cli: Option<String>, env_name: &str, toml: Option<String>, default: &str) -> String {
    cli.filter(|v| !v.trim().is_empty())
        .or_else(|| env_value(env_name))
        .or_else(|| toml.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| default.to_string())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(name: &str) -> bool {
    matches!(
        env_value(name).as_deref().map(str::trim),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}

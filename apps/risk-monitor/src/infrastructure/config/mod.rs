//! Configuration module for the risk monitor.
//!
//! Loads a YAML document with `${VAR}` / `${VAR:-default}` environment
//! interpolation. Without a config file, a built-in template reads
//! everything from the environment.
//!
//! # Usage
//!
//! ```rust,ignore
//! use risk_monitor::infrastructure::config::load_config;
//!
//! // RISK_MONITOR_CONFIG, then ./config.yaml, then the built-in template
//! let config = load_config(None)?;
//! let plan = config.report.to_plan()?;
//! ```

mod exchange;
mod notifier;
mod report;

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use exchange::{ExchangeSettings, RetrySettings};
pub use notifier::NotifierSettings;
pub use report::{
    ExposureRuleKind, ExposureSettings, MarginScopeKind, MarginSettings, PositionQuerySettings,
    ReportSettings,
};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "RISK_MONITOR_CONFIG";

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Template used when no config file exists.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"
exchange:
  environment: "${DERIBIT_ENV:-mainnet}"
  base_url: "${DERIBIT_BASE_URL:-}"
  client_id: "${DERIBIT_CLIENT_ID}"
  client_secret: "${DERIBIT_CLIENT_SECRET}"

notifier:
  bot_token: "${TELEGRAM_BOT_TOKEN}"
  chat_id: "${TELEGRAM_CHAT_ID}"
  dry_run: ${RISK_MONITOR_DRY_RUN:-false}

report:
  title: "${RISK_MONITOR_TITLE:-Deribit Risk Report}"
  currencies: "${RISK_MONITOR_CURRENCIES:-BTC}"
"#;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Exchange connection.
    #[serde(default)]
    pub exchange: ExchangeSettings,
    /// Notification delivery.
    #[serde(default)]
    pub notifier: NotifierSettings,
    /// Report content.
    #[serde(default)]
    pub report: ReportSettings,
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A YAML file.
    File(String),
    /// The built-in environment template.
    BuiltIn,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{path}"),
            Self::BuiltIn => write!(f, "built-in template"),
        }
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration with environment variable interpolation.
///
/// Resolution order: `path`, then `RISK_MONITOR_CONFIG`, then
/// `config.yaml` if it exists, then [`DEFAULT_CONFIG_TEMPLATE`].
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<(Config, ConfigSource), ConfigError> {
    let explicit = path
        .map(str::to_string)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty()));

    let source = match explicit {
        Some(path) => ConfigSource::File(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            ConfigSource::File(DEFAULT_CONFIG_PATH.to_string())
        }
        None => ConfigSource::BuiltIn,
    };

    let contents = match &source {
        ConfigSource::File(path) => {
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.clone(),
                source: e,
            })?
        }
        ConfigSource::BuiltIn => DEFAULT_CONFIG_TEMPLATE.to_string(),
    };

    let config = load_config_from_string(&contents)?;
    Ok((config, source))
}

/// Load configuration from a YAML string, reading variables from the
/// process environment.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    load_config_with(yaml, |name| std::env::var(name).ok())
}

/// Load configuration from a YAML string with a custom variable lookup.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_with(
    yaml: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml, lookup);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become the empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
pub fn interpolate_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).and_then(|var| lookup(var.as_str())) {
            Some(value) if !value.is_empty() => value,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config.exchange.validate()?;
    config.notifier.validate()?;
    config.report.to_plan()?;
    Ok(())
}

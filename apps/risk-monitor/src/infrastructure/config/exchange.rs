//! Exchange connection settings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::application::ports::ClientCredentials;
use crate::infrastructure::exchange::deribit::{DeribitConfig, DeribitEnvironment, RetryConfig};

/// Exchange settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExchangeSettings {
    /// "mainnet" or "testnet".
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Base URL override. Empty uses the environment default.
    #[serde(default)]
    pub base_url: String,
    /// API client id.
    #[serde(default)]
    pub client_id: String,
    /// API client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry policy for data endpoints.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for ExchangeSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            base_url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout_secs: default_timeout_secs(),
            retry: RetrySettings::default(),
        }
    }
}

impl fmt::Debug for ExchangeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeSettings")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("client_id", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ExchangeSettings {
    /// Parse the environment name.
    pub fn environment(&self) -> Result<DeribitEnvironment, ConfigError> {
        match self.environment.trim().to_lowercase().as_str() {
            "mainnet" | "prod" | "production" => Ok(DeribitEnvironment::Mainnet),
            "testnet" | "test" => Ok(DeribitEnvironment::Testnet),
            other => Err(ConfigError::ValidationError(format!(
                "exchange.environment must be mainnet or testnet, got '{other}'"
            ))),
        }
    }

    /// API credentials.
    #[must_use]
    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials::new(self.client_id.trim(), self.client_secret.trim())
    }

    /// Build the adapter configuration.
    pub fn deribit_config(&self) -> Result<DeribitConfig, ConfigError> {
        let mut config = DeribitConfig::new(self.environment()?)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(self.retry.to_retry_config());
        if !self.base_url.trim().is_empty() {
            config = config.with_base_url(self.base_url.trim());
        }
        Ok(config)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        self.environment()?;
        if self.credentials().is_incomplete() {
            return Err(ConfigError::MissingEnvVar(
                "DERIBIT_CLIENT_ID and DERIBIT_CLIENT_SECRET".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "exchange.timeout_secs must be positive".to_string(),
            ));
        }
        self.retry.validate()
    }
}

/// Retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts including the first. 1 disables retry.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Initial backoff in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Maximum backoff in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Backoff multiplier.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
        }
    }
}

impl RetrySettings {
    fn to_retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            multiplier: self.multiplier,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "exchange.retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.multiplier < 1.0 {
            return Err(ConfigError::ValidationError(
                "exchange.retry.multiplier must be >= 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_environment() -> String {
    "mainnet".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_attempts() -> u32 {
    1
}

const fn default_initial_backoff_ms() -> u64 {
    100
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

const fn default_multiplier() -> f64 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn settings() -> ExchangeSettings {
        ExchangeSettings {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            ..ExchangeSettings::default()
        }
    }

    #[test_case("mainnet", DeribitEnvironment::Mainnet)]
    #[test_case("MAINNET", DeribitEnvironment::Mainnet)]
    #[test_case(" testnet ", DeribitEnvironment::Testnet)]
    #[test_case("test", DeribitEnvironment::Testnet)]
    fn environment_names(name: &str, expected: DeribitEnvironment) {
        let settings = ExchangeSettings {
            environment: name.to_string(),
            ..settings()
        };
        assert_eq!(settings.environment().unwrap(), expected);
    }

    #[test]
    fn unknown_environment_rejected() {
        let settings = ExchangeSettings {
            environment: "staging".to_string(),
            ..settings()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn empty_credentials_rejected() {
        let settings = ExchangeSettings {
            client_secret: "  ".to_string(),
            ..settings()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn deribit_config_uses_override() {
        let settings = ExchangeSettings {
            base_url: "http://localhost:9000".to_string(),
            timeout_secs: 5,
            ..settings()
        };
        let config = settings.deribit_config().unwrap();
        assert_eq!(config.base_url(), "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn zero_attempts_rejected() {
        let mut settings = settings();
        settings.retry.max_attempts = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn debug_is_redacted() {
        let settings = ExchangeSettings {
            client_secret: "very-secret".to_string(),
            ..settings()
        };
        assert!(!format!("{settings:?}").contains("very-secret"));
    }
}

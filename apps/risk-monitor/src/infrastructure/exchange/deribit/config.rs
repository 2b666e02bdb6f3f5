//! Deribit adapter configuration.

use std::time::Duration;

/// Deribit API environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeribitEnvironment {
    /// Production.
    #[default]
    Mainnet,
    /// Test exchange (test.deribit.com).
    Testnet,
}

impl DeribitEnvironment {
    /// Get the REST API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://www.deribit.com/api/v2",
            Self::Testnet => "https://test.deribit.com/api/v2",
        }
    }

    /// Check if this is the production exchange.
    #[must_use]
    pub const fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }
}

impl std::fmt::Display for DeribitEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainnet => write!(f, "MAINNET"),
            Self::Testnet => write!(f, "TESTNET"),
        }
    }
}

/// Configuration for the Deribit exchange adapter.
#[derive(Debug, Clone)]
pub struct DeribitConfig {
    /// API environment.
    pub environment: DeribitEnvironment,
    /// Base URL override (proxies, tests).
    pub base_url: Option<String>,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retry policy for data endpoints.
    pub retry: RetryConfig,
}

impl Default for DeribitConfig {
    fn default() -> Self {
        Self::new(DeribitEnvironment::default())
    }
}

impl DeribitConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(environment: DeribitEnvironment) -> Self {
        Self {
            environment,
            base_url: None,
            timeout: Duration::from_secs(30),
            retry: RetryConfig::single_attempt(),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Effective base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }
}

/// Retry configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, including the first. `1` disables retry.
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl RetryConfig {
    /// One attempt, no retry.
    #[must_use]
    pub const fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::single_attempt()
    }
}

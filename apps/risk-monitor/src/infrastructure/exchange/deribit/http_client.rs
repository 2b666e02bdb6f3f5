//! HTTP client wrapper with retry logic.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::api_types::DeribitEnvelope;
use super::config::{DeribitConfig, RetryConfig};
use super::error::DeribitError;

/// HTTP client for the Deribit JSON-RPC over HTTP API.
#[derive(Debug, Clone)]
pub struct DeribitHttpClient {
    client: Client,
    base_url: String,
    retry_config: RetryConfig,
}

impl DeribitHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &DeribitConfig) -> Result<Self, DeribitError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeribitError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            retry_config: config.retry.clone(),
        })
    }

    /// Get the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call a public method once, without retry.
    pub async fn public_get_once<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, DeribitError> {
        self.request(method, params, None, &RetryConfig::single_attempt())
            .await
    }

    /// Call a public method.
    pub async fn public_get<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, DeribitError> {
        self.request(method, params, None, &self.retry_config).await
    }

    /// Call a private method with a bearer token.
    pub async fn private_get<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
        token: &str,
    ) -> Result<T, DeribitError> {
        self.request(method, params, Some(token), &self.retry_config)
            .await
    }

    /// Internal request implementation with retry logic.
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
        token: Option<&str>,
        retry: &RetryConfig,
    ) -> Result<T, DeribitError> {
        let url = format!("{}/{method}", self.base_url);
        let mut backoff = ExponentialBackoff::new(retry);

        loop {
            let mut request = self.client.get(&url).query(params);
            if let Some(token) = token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(resp) => resp,
                Err(e) => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            method,
                            error = %e,
                            delay_ms = delay.as_millis(),
                            attempt = backoff.attempt,
                            "Network error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(exhausted(&backoff, DeribitError::Network(e.to_string())));
                }
            };

            let status = response.status();
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            let body = response
                .text()
                .await
                .map_err(|e| DeribitError::Network(e.to_string()))?;

            if status.is_success() {
                let envelope: DeribitEnvelope<T> = serde_json::from_str(&body)
                    .map_err(|e| DeribitError::JsonParse(format!("{method}: {e}")))?;
                return envelope.into_result();
            }

            // Deribit reports most failures as a JSON-RPC error with a 4xx status
            let error = match serde_json::from_str::<DeribitEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
            {
                Some(rpc_error) => DeribitError::from(rpc_error),
                None => DeribitError::Http {
                    status: status.as_u16(),
                    body,
                },
            };

            match categorize_status(status) {
                ErrorCategory::RateLimited => {
                    let delay = backoff.next_backoff().map(|delay| {
                        retry_after.map_or(delay, Duration::from_secs)
                    });
                    if let Some(delay) = delay {
                        tracing::warn!(
                            method,
                            delay_ms = delay.as_millis(),
                            "Rate limited, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(DeribitError::RateLimited {
                        retry_after_secs: retry_after.unwrap_or(1),
                    });
                }
                ErrorCategory::Retryable => {
                    if let Some(delay) = backoff.next_backoff() {
                        tracing::warn!(
                            method,
                            error = %error,
                            delay_ms = delay.as_millis(),
                            "Retryable error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(exhausted(&backoff, error));
                }
                ErrorCategory::NonRetryable => {
                    return match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            Err(DeribitError::AuthenticationFailed(error.to_string()))
                        }
                        _ => Err(error),
                    };
                }
            }
        }
    }
}

/// Final error once the retry budget is spent. A single-attempt policy
/// returns the underlying error unchanged.
fn exhausted(backoff: &ExponentialBackoff, error: DeribitError) -> DeribitError {
    if backoff.max_attempts <= 1 {
        return error;
    }
    DeribitError::MaxRetriesExceeded {
        attempts: backoff.attempt,
        last_error: error.to_string(),
    }
}

/// Error category for determining retry behavior.
enum ErrorCategory {
    RateLimited,
    Retryable,
    NonRetryable,
}

/// Categorize HTTP status code for retry handling.
const fn categorize_status(status: StatusCode) -> ErrorCategory {
    match status.as_u16() {
        429 => ErrorCategory::RateLimited,
        408 | 500 | 502 | 503 | 504 => ErrorCategory::Retryable,
        _ => ErrorCategory::NonRetryable,
    }
}

/// Exponential backoff calculator.
struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
}

impl ExponentialBackoff {
    const fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 0,
            max_attempts: config.max_attempts,
            current_backoff: config.initial_backoff,
            max_backoff: config.max_backoff,
            multiplier: config.multiplier,
        }
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let backoff = self.current_backoff;
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(backoff)
    }
}

//! Deribit-specific error types.

use thiserror::Error;

use crate::application::ports::ExchangeError;

/// JSON-RPC error codes that mean the credentials or token were refused.
const AUTH_ERROR_CODES: [i64; 3] = [
    13004, // invalid_credentials
    13009, // unauthorized
    13021, // forbidden
];

/// Errors from the Deribit adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeribitError {
    /// HTTP request failed with a status and no JSON-RPC error body.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// API returned a JSON-RPC error.
    #[error("API error: {code} - {message}")]
    Api {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// Credentials or token rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Suggested retry delay in seconds.
        retry_after_secs: u64,
    },

    /// Network error (retryable).
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Max retries exceeded.
    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Last error seen.
        last_error: String,
    },
}

impl DeribitError {
    /// Check if this error means the credentials or token were refused.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        match self {
            Self::AuthenticationFailed(_) => true,
            Self::Api { code, .. } => AUTH_ERROR_CODES.contains(code),
            _ => false,
        }
    }
}

impl From<DeribitError> for ExchangeError {
    fn from(err: DeribitError) -> Self {
        if err.is_auth() {
            return Self::Authentication {
                message: err.to_string(),
            };
        }
        match err {
            DeribitError::JsonParse(msg) => Self::InvalidResponse { message: msg },
            other => Self::Request {
                message: other.to_string(),
            },
        }
    }
}

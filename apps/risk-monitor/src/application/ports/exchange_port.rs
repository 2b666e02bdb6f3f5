//! Exchange Port (Driven Port)
//!
//! Interface for reading account state from a derivatives exchange.

use async_trait::async_trait;
use std::fmt;

use crate::domain::account::{AccountSummary, IndexPrice};
use crate::domain::exposure::{InstrumentKind, Position};
use crate::domain::shared::Currency;

/// API client credentials.
///
/// `Debug` never prints the values.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Create new credentials.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Get the client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Whether either value is empty.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.client_id.is_empty() || self.client_secret.is_empty()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Bearer token valid for the remainder of one run.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_in_secs: Option<u64>,
}

impl AccessToken {
    /// Create a new access token.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_in_secs: Option<u64>) -> Self {
        Self {
            token: token.into(),
            expires_in_secs,
        }
    }

    /// Raw token value for the `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.token
    }

    /// Token lifetime reported by the exchange.
    #[must_use]
    pub const fn expires_in_secs(&self) -> Option<u64> {
        self.expires_in_secs
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

/// Exchange port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// Credentials rejected or the auth endpoint failed.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error details.
        message: String,
    },

    /// Transport failure or non-success response.
    #[error("Exchange request failed: {message}")]
    Request {
        /// Error details.
        message: String,
    },

    /// Response could not be decoded.
    #[error("Invalid exchange response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },
}

/// Port for exchange reads.
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Exchange client credentials for a bearer token.
    async fn authenticate(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<AccessToken, ExchangeError>;

    /// Get the account summary for one settlement currency.
    async fn get_account_summary(
        &self,
        token: &AccessToken,
        currency: &Currency,
    ) -> Result<AccountSummary, ExchangeError>;

    /// Get the USD index price of a currency.
    async fn get_index_price(&self, currency: &Currency) -> Result<IndexPrice, ExchangeError>;

    /// Get open positions for a currency and instrument kind.
    async fn get_positions(
        &self,
        token: &AccessToken,
        currency: &Currency,
        kind: InstrumentKind,
    ) -> Result<Vec<Position>, ExchangeError>;
}

//! Deribit exchange adapter implementing ExchangePort.

use async_trait::async_trait;

use crate::application::ports::{AccessToken, ClientCredentials, ExchangeError, ExchangePort};
use crate::domain::account::{AccountSummary, IndexPrice};
use crate::domain::exposure::{InstrumentKind, Position};
use crate::domain::shared::Currency;

use super::api_types::{
    DeribitAccountSummaryResult, DeribitAuthResult, DeribitIndexPriceResult, DeribitPositionResult,
};
use super::config::{DeribitConfig, DeribitEnvironment};
use super::error::DeribitError;
use super::http_client::DeribitHttpClient;

const AUTH: &str = "public/auth";
const GET_ACCOUNT_SUMMARY: &str = "private/get_account_summary";
const GET_INDEX_PRICE: &str = "public/get_index_price";
const GET_POSITIONS: &str = "private/get_positions";

/// Deribit exchange adapter.
///
/// Implements `ExchangePort` for the Deribit v2 API.
#[derive(Debug, Clone)]
pub struct DeribitExchangeAdapter {
    client: DeribitHttpClient,
    environment: DeribitEnvironment,
}

impl DeribitExchangeAdapter {
    /// Create a new Deribit exchange adapter.
    pub fn new(config: DeribitConfig) -> Result<Self, DeribitError> {
        let client = DeribitHttpClient::new(&config)?;
        Ok(Self {
            client,
            environment: config.environment,
        })
    }

    /// Get the API environment.
    #[must_use]
    pub const fn environment(&self) -> DeribitEnvironment {
        self.environment
    }
}

#[async_trait]
impl ExchangePort for DeribitExchangeAdapter {
    async fn authenticate(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<AccessToken, ExchangeError> {
        if credentials.is_incomplete() {
            return Err(ExchangeError::Authentication {
                message: "client id or secret is empty".to_string(),
            });
        }

        tracing::debug!(
            environment = %self.environment,
            base_url = self.client.base_url(),
            "Authenticating with client credentials"
        );

        let result: DeribitAuthResult = self
            .client
            .public_get_once(
                AUTH,
                &[
                    ("grant_type", "client_credentials"),
                    ("client_id", credentials.client_id()),
                    ("client_secret", credentials.client_secret()),
                ],
            )
            .await
            .map_err(|e| ExchangeError::Authentication {
                message: e.to_string(),
            })?;

        Ok(AccessToken::new(result.access_token, result.expires_in))
    }

    async fn get_account_summary(
        &self,
        token: &AccessToken,
        currency: &Currency,
    ) -> Result<AccountSummary, ExchangeError> {
        let result: DeribitAccountSummaryResult = self
            .client
            .private_get(
                GET_ACCOUNT_SUMMARY,
                &[("currency", currency.as_str())],
                token.secret(),
            )
            .await?;

        tracing::debug!(
            currency = %currency,
            margin_model = ?result.margin_model,
            portfolio_margining = ?result.portfolio_margining_enabled,
            "Account summary response"
        );

        Ok(result.to_domain(currency)?)
    }

    async fn get_index_price(&self, currency: &Currency) -> Result<IndexPrice, ExchangeError> {
        let index_name = currency.usd_index_name();
        let result: DeribitIndexPriceResult = self
            .client
            .public_get(GET_INDEX_PRICE, &[("index_name", index_name.as_str())])
            .await?;

        Ok(result.to_domain(currency))
    }

    async fn get_positions(
        &self,
        token: &AccessToken,
        currency: &Currency,
        kind: InstrumentKind,
    ) -> Result<Vec<Position>, ExchangeError> {
        let result: Vec<DeribitPositionResult> = self
            .client
            .private_get(
                GET_POSITIONS,
                &[("currency", currency.as_str()), ("kind", kind.as_str())],
                token.secret(),
            )
            .await?;

        Ok(result.iter().map(DeribitPositionResult::to_domain).collect())
    }
}

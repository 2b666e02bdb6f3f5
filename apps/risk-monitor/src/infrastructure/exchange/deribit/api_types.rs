//! Deribit API response types.
//!
//! These types map directly to Deribit's JSON-RPC over HTTP format.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::DeribitError;
use crate::domain::account::{AccountSummary, IndexPrice};
use crate::domain::exposure::Position;
use crate::domain::shared::Currency;

// ============================================================================
// Envelope
// ============================================================================

/// JSON-RPC response envelope. Exactly one of `result` or `error` is set.
#[derive(Debug, Deserialize)]
pub struct DeribitEnvelope<T> {
    /// Successful payload.
    pub result: Option<T>,
    /// Error payload.
    pub error: Option<DeribitRpcError>,
}

impl<T> DeribitEnvelope<T> {
    /// Unwrap the envelope into its payload or a typed error.
    pub fn into_result(self) -> Result<T, DeribitError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(error.into()),
            (Some(result), None) => Ok(result),
            (None, None) => Err(DeribitError::JsonParse(
                "response has neither result nor error".to_string(),
            )),
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Deserialize)]
pub struct DeribitRpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
    /// Additional details.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl From<DeribitRpcError> for DeribitError {
    fn from(err: DeribitRpcError) -> Self {
        let message = match err.data {
            Some(data) => format!("{} ({data})", err.message),
            None => err.message,
        };
        Self::Api {
            code: err.code,
            message,
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// `public/auth` result.
#[derive(Clone, Deserialize)]
pub struct DeribitAuthResult {
    /// Bearer token.
    pub access_token: String,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scope.
    #[serde(default)]
    pub scope: Option<String>,
    /// Token type (always "bearer").
    #[serde(default)]
    pub token_type: Option<String>,
}

impl fmt::Debug for DeribitAuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeribitAuthResult")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// `private/get_account_summary` result.
#[derive(Debug, Clone, Deserialize)]
pub struct DeribitAccountSummaryResult {
    /// Currency code.
    pub currency: String,
    /// Account equity in the settlement currency.
    pub equity: Decimal,
    /// Maintenance margin in the settlement currency.
    pub maintenance_margin: Decimal,
    /// Equity in USD, when provided.
    #[serde(default)]
    pub equity_usd: Option<Decimal>,
    /// Maintenance margin in USD, when provided.
    #[serde(default)]
    pub maintenance_margin_usd: Option<Decimal>,
    /// Margin model (e.g. "segregated_sm", "cross_pm").
    #[serde(default)]
    pub margin_model: Option<String>,
    /// Portfolio margining enabled.
    #[serde(default)]
    pub portfolio_margining_enabled: Option<bool>,
}

impl DeribitAccountSummaryResult {
    /// Convert to a domain account summary for the requested currency.
    pub fn to_domain(&self, requested: &Currency) -> Result<AccountSummary, DeribitError> {
        if !self.currency.eq_ignore_ascii_case(requested.as_str()) {
            return Err(DeribitError::JsonParse(format!(
                "summary currency {} does not match requested {requested}",
                self.currency
            )));
        }
        Ok(
            AccountSummary::new(requested.clone(), self.equity, self.maintenance_margin)
                .with_usd_fields(self.equity_usd, self.maintenance_margin_usd),
        )
    }
}

/// `public/get_index_price` result.
#[derive(Debug, Clone, Deserialize)]
pub struct DeribitIndexPriceResult {
    /// Current index price.
    pub index_price: Decimal,
}

impl DeribitIndexPriceResult {
    /// Convert to a domain index price.
    pub fn to_domain(&self, currency: &Currency) -> IndexPrice {
        IndexPrice::new(currency.clone(), self.index_price)
    }
}

/// One element of the `private/get_positions` result.
#[derive(Debug, Clone, Deserialize)]
pub struct DeribitPositionResult {
    /// Instrument name.
    pub instrument_name: String,
    /// Signed size.
    pub size: Decimal,
    /// Current mark price.
    pub mark_price: Decimal,
}

impl DeribitPositionResult {
    /// Convert to a domain position.
    pub fn to_domain(&self) -> Position {
        Position::new(self.instrument_name.clone(), self.size, self.mark_price)
    }
}

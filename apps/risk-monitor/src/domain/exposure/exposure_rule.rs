//! Position reduction rules.

use rust_decimal::Decimal;

use super::option_exposure::OptionExposure;
use super::position::Position;
use crate::domain::shared::{Currency, DomainError};

/// How open positions are reduced to a single exposure figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExposureRule {
    /// Filtered sum over short calls on one underlying.
    ///
    /// A position qualifies when its instrument name contains `underlying`,
    /// its size is negative and its name carries the call marker.
    ShortCalls {
        /// Substring the instrument name must contain.
        underlying: String,
        /// Currency whose USD index values the mark prices.
        index_currency: Currency,
    },
    /// Unfiltered signed sum over every returned position.
    NetNotional {
        /// Underlying label for the report.
        underlying: String,
        /// Units per contract when sizes are reported in contracts.
        contract_multiplier: Option<Decimal>,
    },
}

impl ExposureRule {
    /// Short-call rule valued through the underlying's own index.
    #[must_use]
    pub fn short_calls(underlying: Currency) -> Self {
        Self::ShortCalls {
            underlying: underlying.as_str().to_string(),
            index_currency: underlying,
        }
    }

    /// Net-notional rule.
    #[must_use]
    pub fn net_notional(underlying: impl Into<String>, contract_multiplier: Option<Decimal>) -> Self {
        Self::NetNotional {
            underlying: underlying.into(),
            contract_multiplier,
        }
    }

    /// Currency whose index price the rule needs, if any.
    #[must_use]
    pub const fn index_currency(&self) -> Option<&Currency> {
        match self {
            Self::ShortCalls { index_currency, .. } => Some(index_currency),
            Self::NetNotional { .. } => None,
        }
    }

    /// Reduce positions to an exposure figure.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingIndexPrice`] when the short-call rule is
    /// applied without the underlying's index price.
    pub fn reduce(
        &self,
        positions: &[Position],
        index_price: Option<Decimal>,
    ) -> Result<OptionExposure, DomainError> {
        match self {
            Self::ShortCalls {
                underlying,
                index_currency,
            } => {
                let price = index_price.ok_or_else(|| DomainError::MissingIndexPrice {
                    currency: index_currency.to_string(),
                })?;
                let (quantity, usd_cost_to_close, count) =
                    short_call_exposure(positions, underlying, price);
                Ok(OptionExposure::ShortCalls {
                    underlying: underlying.clone(),
                    quantity,
                    usd_cost_to_close,
                    positions: count,
                })
            }
            Self::NetNotional {
                underlying,
                contract_multiplier,
            } => Ok(OptionExposure::NetNotional {
                underlying: underlying.clone(),
                net: net_notional(positions, *contract_multiplier),
                positions: positions.len(),
            }),
        }
    }
}

/// Filtered sum over short calls on `underlying`.
///
/// Returns `(quantity, usd_cost_to_close, qualifying_positions)` where
/// quantity is `Σ|size|` and cost is `Σ|size| × mark_price × index_price`.
#[must_use]
pub fn short_call_exposure(
    positions: &[Position],
    underlying: &str,
    index_price: Decimal,
) -> (Decimal, Decimal, usize) {
    positions
        .iter()
        .filter(|p| p.matches_underlying(underlying) && p.is_short() && p.is_call())
        .fold((Decimal::ZERO, Decimal::ZERO, 0), |(qty, usd, n), p| {
            let size = p.size.abs();
            (qty + size, usd + size * p.mark_price * index_price, n + 1)
        })
}

/// Signed sum of sizes, each scaled by the contract multiplier when given.
#[must_use]
pub fn net_notional(positions: &[Position], contract_multiplier: Option<Decimal>) -> Decimal {
    let multiplier = contract_multiplier.unwrap_or(Decimal::ONE);
    positions.iter().map(|p| p.size * multiplier).sum()
}

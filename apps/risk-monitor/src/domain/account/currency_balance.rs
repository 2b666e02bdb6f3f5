//! USD-converted per-currency balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Currency;

/// How a balance reached its USD figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSource {
    /// The exchange reported the USD amounts directly.
    ExchangeProvided,
    /// Converted manually at the given USD index price.
    IndexPrice(Decimal),
}

/// One currency's account figures in both native units and USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyBalance {
    /// Settlement currency.
    pub currency: Currency,
    /// Equity in the settlement currency.
    pub equity: Decimal,
    /// Maintenance margin in the settlement currency.
    pub maintenance_margin: Decimal,
    /// Equity in USD.
    pub equity_usd: Decimal,
    /// Maintenance margin in USD.
    pub maintenance_margin_usd: Decimal,
    /// Conversion source.
    pub source: ConversionSource,
}

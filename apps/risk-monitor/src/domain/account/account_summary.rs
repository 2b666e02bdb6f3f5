//! Account Summary Value Object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency_balance::{ConversionSource, CurrencyBalance};
use crate::domain::shared::{Currency, DomainError};

/// Per-currency account summary as reported by the exchange.
///
/// `equity` and `maintenance_margin` are denominated in the settlement
/// currency. The `_usd` fields are only present when the exchange already
/// converted them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Settlement currency.
    pub currency: Currency,
    /// Account equity in the settlement currency.
    pub equity: Decimal,
    /// Maintenance margin in the settlement currency.
    pub maintenance_margin: Decimal,
    /// Exchange-provided equity in USD.
    pub equity_usd: Option<Decimal>,
    /// Exchange-provided maintenance margin in USD.
    pub maintenance_margin_usd: Option<Decimal>,
}

impl AccountSummary {
    /// Create a summary with no exchange-provided USD fields.
    #[must_use]
    pub const fn new(currency: Currency, equity: Decimal, maintenance_margin: Decimal) -> Self {
        Self {
            currency,
            equity,
            maintenance_margin,
            equity_usd: None,
            maintenance_margin_usd: None,
        }
    }

    /// Attach exchange-provided USD fields.
    #[must_use]
    pub const fn with_usd_fields(
        mut self,
        equity_usd: Option<Decimal>,
        maintenance_margin_usd: Option<Decimal>,
    ) -> Self {
        self.equity_usd = equity_usd;
        self.maintenance_margin_usd = maintenance_margin_usd;
        self
    }

    /// Whether converting this summary requires an index price.
    ///
    /// True as soon as one of the USD fields is missing.
    #[must_use]
    pub const fn needs_index_price(&self) -> bool {
        self.equity_usd.is_none() || self.maintenance_margin_usd.is_none()
    }

    /// Convert into a USD-denominated balance.
    ///
    /// Exchange-provided USD fields win over manual conversion. Each missing
    /// field is converted as `amount × index_price`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingIndexPrice`] if a field needs manual
    /// conversion and no index price was supplied.
    pub fn to_usd(&self, index_price: Option<Decimal>) -> Result<CurrencyBalance, DomainError> {
        let convert = |provided: Option<Decimal>, amount: Decimal| match provided {
            Some(usd) => Ok(usd),
            None => index_price
                .map(|price| amount * price)
                .ok_or_else(|| DomainError::MissingIndexPrice {
                    currency: self.currency.to_string(),
                }),
        };

        let equity_usd = convert(self.equity_usd, self.equity)?;
        let maintenance_margin_usd = convert(self.maintenance_margin_usd, self.maintenance_margin)?;

        let source = match (self.needs_index_price(), index_price) {
            (true, Some(price)) => ConversionSource::IndexPrice(price),
            _ => ConversionSource::ExchangeProvided,
        };

        Ok(CurrencyBalance {
            currency: self.currency.clone(),
            equity: self.equity,
            maintenance_margin: self.maintenance_margin,
            equity_usd,
            maintenance_margin_usd,
            source,
        })
    }
}

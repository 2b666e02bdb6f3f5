//! Index Price Value Object

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Currency;

/// Exchange-published USD spot reference price for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPrice {
    /// Currency being priced.
    pub currency: Currency,
    /// Price of one unit in USD.
    pub price_usd: Decimal,
}

impl IndexPrice {
    /// Create a new index price.
    #[must_use]
    pub const fn new(currency: Currency, price_usd: Decimal) -> Self {
        Self {
            currency,
            price_usd,
        }
    }
}

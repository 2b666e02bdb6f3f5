//! Currency value object for settlement currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// A settlement currency code.
///
/// Examples: "BTC", "ETH", "SOL", "USDC".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Create a new Currency.
    ///
    /// The code is trimmed and normalized to uppercase.
    ///
    /// # Errors
    ///
    /// Returns error if the code is empty or contains characters other than
    /// ASCII letters and digits.
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = code.as_ref().trim();

        if code.is_empty() {
            return Err(DomainError::invalid("currency", "Currency cannot be empty"));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::invalid(
                "currency",
                format!("Currency '{code}' contains invalid characters"),
            ));
        }

        Ok(Self(code.to_uppercase()))
    }

    /// Get the currency code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the exchange index quoting this currency in USD.
    ///
    /// Every currency, stablecoins included, is priced through its own
    /// `<code>_usd` index.
    #[must_use]
    pub fn usd_index_name(&self) -> String {
        format!("{}_usd", self.0.to_lowercase())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

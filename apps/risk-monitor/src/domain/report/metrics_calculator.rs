//! Metrics Calculator
//!
//! Sums USD-converted balances and derives margin usage. No I/O.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::risk_report::RiskReport;
use crate::domain::account::CurrencyBalance;
use crate::domain::exposure::OptionExposure;
use crate::domain::shared::{Currency, DomainError};

/// Which balances contribute to the total maintenance margin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarginScope {
    /// Every currency reports its own maintenance margin; sum them all.
    #[default]
    PerCurrency,
    /// The maintenance margin is an account-wide figure reported under one
    /// currency (portfolio margin). Only that currency's figure is counted.
    Global(Currency),
}

/// Combines converted balances and exposure into a [`RiskReport`].
#[derive(Debug, Clone, Default)]
pub struct MetricsCalculator {
    scope: MarginScope,
}

impl MetricsCalculator {
    /// Create a calculator with the given margin scope.
    #[must_use]
    pub const fn new(scope: MarginScope) -> Self {
        Self { scope }
    }

    /// Get the margin scope.
    #[must_use]
    pub const fn scope(&self) -> &MarginScope {
        &self.scope
    }

    /// Build the report.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingBalance`] when the global margin currency
    /// is not among the balances.
    pub fn calculate(
        &self,
        balances: Vec<CurrencyBalance>,
        option_exposure: Option<OptionExposure>,
        generated_at: DateTime<Utc>,
    ) -> Result<RiskReport, DomainError> {
        let total_nav_usd: Decimal = balances.iter().map(|b| b.equity_usd).sum();

        let total_maint_margin_usd: Decimal = match &self.scope {
            MarginScope::PerCurrency => balances.iter().map(|b| b.maintenance_margin_usd).sum(),
            MarginScope::Global(currency) => balances
                .iter()
                .find(|b| &b.currency == currency)
                .map(|b| b.maintenance_margin_usd)
                .ok_or_else(|| DomainError::MissingBalance {
                    currency: currency.to_string(),
                })?,
        };

        Ok(RiskReport {
            generated_at,
            balances,
            total_nav_usd,
            total_maint_margin_usd,
            margin_usage_pct: margin_usage_pct(total_maint_margin_usd, total_nav_usd),
            option_exposure,
        })
    }
}

/// Maintenance margin as a percentage of equity.
///
/// Zero for non-positive equity rather than a division error.
#[must_use]
pub fn margin_usage_pct(maintenance_margin: Decimal, equity: Decimal) -> Decimal {
    if equity <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    maintenance_margin / equity * Decimal::ONE_HUNDRED
}

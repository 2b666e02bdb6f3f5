//! Risk Report Aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::account::CurrencyBalance;
use crate::domain::exposure::OptionExposure;

/// The aggregate output of one pipeline run.
///
/// Invariant: `margin_usage_pct` is zero whenever `total_nav_usd <= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Per-currency breakdown, in configured order.
    pub balances: Vec<CurrencyBalance>,
    /// Total equity in USD.
    pub total_nav_usd: Decimal,
    /// Total maintenance margin in USD.
    pub total_maint_margin_usd: Decimal,
    /// Maintenance margin as a percentage of equity.
    pub margin_usage_pct: Decimal,
    /// Option exposure, when the report is configured with a rule.
    pub option_exposure: Option<OptionExposure>,
}

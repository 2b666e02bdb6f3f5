//! Risk Report Bounded Context
//!
//! Pure aggregation of converted balances and option exposure into the
//! fixed report delivered to the chat.

mod metrics_calculator;
mod risk_report;

pub use metrics_calculator::{MarginScope, MetricsCalculator, margin_usage_pct};
pub use risk_report::RiskReport;

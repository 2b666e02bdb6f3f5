//! Message Renderer
//!
//! Renders a [`RiskReport`] into the Telegram Markdown template.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use thousands::Separable;

use crate::domain::exposure::OptionExposure;
use crate::domain::report::RiskReport;

/// Title used when none is configured.
pub const DEFAULT_REPORT_TITLE: &str = "Deribit Risk Report";

const DIVIDER: &str = "━━━━━━━━━━━━━━━";

/// Decimal places for amounts in a crypto currency.
const CRYPTO_DP: u32 = 4;

/// Decimal places for USD amounts.
const USD_DP: u32 = 2;

/// Decimal places for percentages.
const PCT_DP: u32 = 2;

/// Renders reports into chat messages.
#[derive(Debug, Clone)]
pub struct MessageRenderer {
    title: String,
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_TITLE)
    }
}

impl MessageRenderer {
    /// Create a renderer with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Report title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render the report.
    #[must_use]
    pub fn render(&self, report: &RiskReport) -> String {
        let mut msg = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(msg, "📊 *{}*", bold_text(&self.title));
        let _ = writeln!(msg, "{DIVIDER}");
        let _ = writeln!(msg, "💰 *NAV:* ${}", format_usd(report.total_nav_usd));
        let _ = writeln!(
            msg,
            "⚠️ *Maint. Margin:* ${}",
            format_usd(report.total_maint_margin_usd)
        );
        let _ = writeln!(
            msg,
            "📉 *Margin Usage:* {}%",
            format_pct(report.margin_usage_pct)
        );

        if !report.balances.is_empty() {
            let _ = writeln!(msg, "{DIVIDER}");
            for balance in &report.balances {
                let _ = writeln!(
                    msg,
                    "• *{}:* {} (${})",
                    bold_text(balance.currency.as_str()),
                    format_crypto(balance.equity),
                    format_usd(balance.equity_usd)
                );
            }
        }

        if let Some(exposure) = &report.option_exposure {
            let _ = writeln!(msg, "{DIVIDER}");
            let _ = writeln!(msg, "{}", render_exposure(exposure));
        }

        let _ = writeln!(msg, "{DIVIDER}");
        let _ = write!(
            msg,
            "🕒 {}",
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        );

        msg
    }
}

fn render_exposure(exposure: &OptionExposure) -> String {
    match exposure {
        OptionExposure::ShortCalls {
            underlying,
            quantity,
            usd_cost_to_close,
            ..
        } => format!(
            "🎯 *{} Short Calls:* {} (${})",
            bold_text(underlying),
            format_crypto(*quantity),
            format_usd(*usd_cost_to_close)
        ),
        OptionExposure::NetNotional {
            underlying, net, ..
        } => format!(
            "🧭 *{} Net Options:* {}",
            bold_text(underlying),
            format_crypto(*net)
        ),
    }
}

/// Prepare text for a `*bold*` span in legacy Telegram Markdown.
///
/// Escapes are not honored inside an entity, so the only character that
/// matters is the closing `*`, which is dropped.
#[must_use]
pub fn bold_text(text: &str) -> String {
    text.replace('*', "")
}

/// Format a crypto amount: 4 dp, comma thousands separators.
#[must_use]
pub fn format_crypto(value: Decimal) -> String {
    format_fixed(value, CRYPTO_DP)
}

/// Format a USD amount: 2 dp, comma thousands separators.
#[must_use]
pub fn format_usd(value: Decimal) -> String {
    format_fixed(value, USD_DP)
}

/// Format a percentage: 2 dp.
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format_fixed(value, PCT_DP)
}

fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.*}", dp as usize, rounded.abs()).separate_with_commas();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{digits}")
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::AccountSummary;
    use crate::domain::shared::Currency;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn report(option_exposure: Option<OptionExposure>) -> RiskReport {
        let balance = AccountSummary::new(Currency::new("BTC").unwrap(), dec!(10), dec!(1))
            .to_usd(Some(dec!(50000)))
            .unwrap();
        RiskReport {
            generated_at: Utc.with_ymd_and_hms(2024, 12, 1, 8, 30, 0).unwrap(),
            balances: vec![balance],
            total_nav_usd: dec!(500000),
            total_maint_margin_usd: dec!(50000),
            margin_usage_pct: dec!(10),
            option_exposure,
        }
    }

    #[test_case(dec!(500000), "500,000.00")]
    #[test_case(dec!(0), "0.00")]
    #[test_case(dec!(1234567.891), "1,234,567.89")]
    #[test_case(dec!(0.005), "0.01")]
    #[test_case(dec!(-1234.5), "-1,234.50")]
    #[test_case(dec!(-0.001), "0.00")]
    fn usd_formatting(value: Decimal, expected: &str) {
        assert_eq!(format_usd(value), expected);
    }

    #[test_case(dec!(7), "7.0000")]
    #[test_case(dec!(12345.123456), "12,345.1235")]
    #[test_case(dec!(-3), "-3.0000")]
    fn crypto_formatting(value: Decimal, expected: &str) {
        assert_eq!(format_crypto(value), expected);
    }

    #[test]
    fn pct_formatting() {
        assert_eq!(format_pct(dec!(10)), "10.00");
        assert_eq!(format_pct(dec!(33.33333)), "33.33");
    }

    #[test_case("PAXG_USDC", "PAXG_USDC" ; "underscore kept")]
    #[test_case("*live*", "live" ; "asterisks dropped")]
    #[test_case("[x]`", "[x]`" ; "other markers kept")]
    fn bold_text_cases(input: &str, expected: &str) {
        assert_eq!(bold_text(input), expected);
    }

    #[test]
    fn renders_totals() {
        let text = MessageRenderer::default().render(&report(None));

        assert!(text.starts_with("📊 *Deribit Risk Report*\n"));
        assert!(text.contains("💰 *NAV:* $500,000.00"));
        assert!(text.contains("⚠️ *Maint. Margin:* $50,000.00"));
        assert!(text.contains("📉 *Margin Usage:* 10.00%"));
        assert!(text.contains("• *BTC:* 10.0000 ($500,000.00)"));
        assert!(text.ends_with("🕒 2024-12-01 08:30 UTC"));
        assert!(!text.contains("Short Calls"));
    }

    #[test]
    fn renders_short_call_exposure() {
        let text = MessageRenderer::default().render(&report(Some(OptionExposure::ShortCalls {
            underlying: "BTC".to_string(),
            quantity: dec!(7),
            usd_cost_to_close: dec!(3500),
            positions: 2,
        })));

        assert!(text.contains("🎯 *BTC Short Calls:* 7.0000 ($3,500.00)"));
    }

    #[test]
    fn renders_net_notional_exposure() {
        let text = MessageRenderer::default().render(&report(Some(OptionExposure::NetNotional {
            underlying: "SOL_USDC".to_string(),
            net: dec!(-2000),
            positions: 3,
        })));

        assert!(text.contains("🧭 *SOL_USDC Net Options:* -2,000.0000"));
        assert!(!text.contains('\\'));
    }

    #[test]
    fn title_keeps_bold_span_closed() {
        let text = MessageRenderer::new("desk_1 *live*").render(&report(None));
        assert!(text.starts_with("📊 *desk_1 live*\n"));
    }
}

//! Open position snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Instrument-name suffix marking a call option (e.g. `BTC-27DEC24-100000-C`).
const CALL_SUFFIX: &str = "-C";

/// Instrument-name suffix marking a put option.
const PUT_SUFFIX: &str = "-P";

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

/// One open position as reported by the exchange.
///
/// `size` is signed: negative means short. Its unit depends on the
/// instrument (underlying units for inverse options, contracts for some
/// linear instruments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Exchange instrument name.
    pub instrument_name: String,
    /// Signed position size.
    pub size: Decimal,
    /// Current mark price, in the instrument's quote unit.
    pub mark_price: Decimal,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub fn new(instrument_name: impl Into<String>, size: Decimal, mark_price: Decimal) -> Self {
        Self {
            instrument_name: instrument_name.into(),
            size,
            mark_price,
        }
    }

    /// Option right derived from the instrument-name suffix.
    #[must_use]
    pub fn option_right(&self) -> Option<OptionRight> {
        if self.instrument_name.ends_with(CALL_SUFFIX) {
            Some(OptionRight::Call)
        } else if self.instrument_name.ends_with(PUT_SUFFIX) {
            Some(OptionRight::Put)
        } else {
            None
        }
    }

    /// Check if this is a call option.
    #[must_use]
    pub fn is_call(&self) -> bool {
        self.option_right() == Some(OptionRight::Call)
    }

    /// Check if the position is short.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.size < Decimal::ZERO
    }

    /// Check if the instrument name contains the given underlying.
    #[must_use]
    pub fn matches_underlying(&self, underlying: &str) -> bool {
        self.instrument_name.contains(underlying)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case("BTC-27DEC24-100000-C", Some(OptionRight::Call) ; "btc call")]
    #[test_case("ETH-28MAR25-4000-P", Some(OptionRight::Put) ; "eth put")]
    #[test_case("SOL_USDC-27DEC24-250-C", Some(OptionRight::Call) ; "linear call")]
    #[test_case("BTC-PERPETUAL", None ; "perpetual")]
    #[test_case("BTC-27DEC24", None ; "future")]
    fn option_right_from_suffix(name: &str, expected: Option<OptionRight>) {
        let position = Position::new(name, dec!(1), dec!(0.01));
        assert_eq!(position.option_right(), expected);
    }

    #[test]
    fn short_and_call_flags() {
        let short_call = Position::new("BTC-27DEC24-100000-C", dec!(-2), dec!(0.01));
        assert!(short_call.is_short());
        assert!(short_call.is_call());

        let long_put = Position::new("BTC-27DEC24-100000-P", dec!(3), dec!(0.02));
        assert!(!long_put.is_short());
        assert!(!long_put.is_call());

        let flat = Position::new("BTC-27DEC24-100000-C", Decimal::ZERO, dec!(0.01));
        assert!(!flat.is_short());
    }

    #[test]
    fn underlying_match_is_substring() {
        let position = Position::new("SOL_USDC-27DEC24-250-C", dec!(-1), dec!(5));
        assert!(position.matches_underlying("SOL"));
        assert!(position.matches_underlying("SOL_USDC"));
        assert!(!position.matches_underlying("BTC"));
    }
}

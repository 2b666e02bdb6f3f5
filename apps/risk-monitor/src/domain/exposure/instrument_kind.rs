//! Instrument kind filter for position queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// Kind of instrument a position query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Options.
    #[default]
    Option,
    /// Futures and perpetuals.
    Future,
    /// Spot.
    Spot,
    /// Option combos.
    OptionCombo,
    /// Future combos.
    FutureCombo,
}

impl InstrumentKind {
    /// Wire name used by the exchange API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Option => "option",
            Self::Future => "future",
            Self::Spot => "spot",
            Self::OptionCombo => "option_combo",
            Self::FutureCombo => "future_combo",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "option" => Ok(Self::Option),
            "future" => Ok(Self::Future),
            "spot" => Ok(Self::Spot),
            "option_combo" => Ok(Self::OptionCombo),
            "future_combo" => Ok(Self::FutureCombo),
            other => Err(DomainError::invalid(
                "instrument kind",
                format!("unknown kind '{other}'"),
            )),
        }
    }
}

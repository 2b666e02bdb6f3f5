//! Option exposure figure carried by the risk report.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of reducing open positions with an [`super::ExposureRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum OptionExposure {
    /// Risk to close short calls on an underlying.
    ShortCalls {
        /// Underlying the calls were filtered on.
        underlying: String,
        /// Total short quantity (absolute).
        quantity: Decimal,
        /// USD cost to buy the shorts back at mark.
        usd_cost_to_close: Decimal,
        /// Number of positions that qualified.
        positions: usize,
    },
    /// Net directional exposure (positive = net long).
    NetNotional {
        /// Underlying label.
        underlying: String,
        /// Signed net size, multiplier applied.
        net: Decimal,
        /// Number of positions summed.
        positions: usize,
    },
}

impl OptionExposure {
    /// Underlying the figure refers to.
    #[must_use]
    pub fn underlying(&self) -> &str {
        match self {
            Self::ShortCalls { underlying, .. } | Self::NetNotional { underlying, .. } => underlying,
        }
    }

    /// Number of positions that contributed.
    #[must_use]
    pub const fn position_count(&self) -> usize {
        match self {
            Self::ShortCalls { positions, .. } | Self::NetNotional { positions, .. } => *positions,
        }
    }
}

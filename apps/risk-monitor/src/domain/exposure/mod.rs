//! Option Exposure Bounded Context
//!
//! This module turns open positions into a single exposure figure:
//! - Short-call exposure: quantity and USD cost to close short calls
//!   on a target underlying
//! - Net notional: signed sum of position sizes with an optional
//!   contract multiplier
//!
//! The two rules answer different questions and are never merged; the
//! report configuration picks one.

mod exposure_rule;
mod instrument_kind;
mod option_exposure;
mod position;

pub use exposure_rule::{ExposureRule, net_notional, short_call_exposure};
pub use instrument_kind::InstrumentKind;
pub use option_exposure::OptionExposure;
pub use position::{OptionRight, Position};

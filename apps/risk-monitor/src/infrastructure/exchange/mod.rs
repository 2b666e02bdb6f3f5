//! Exchange Adapters
//!
//! Implementations of `ExchangePort`.

pub mod deribit;

pub use deribit::{DeribitConfig, DeribitEnvironment, DeribitError, DeribitExchangeAdapter};

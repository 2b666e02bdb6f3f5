//! Deribit Exchange Adapter
//!
//! Implementation of `ExchangePort` for the Deribit v2 HTTP API with:
//! - Client-credentials authentication (never retried)
//! - JSON-RPC envelope decoding into typed errors
//! - Optional retry with exponential backoff for data endpoints
//! - Mainnet/testnet selection with a base URL override

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::DeribitExchangeAdapter;
pub use config::{DeribitConfig, DeribitEnvironment, RetryConfig};
pub use error::DeribitError;

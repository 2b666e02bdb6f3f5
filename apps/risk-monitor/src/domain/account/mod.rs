//! Account Bounded Context
//!
//! Per-currency account snapshots and their conversion into USD:
//! - Account summaries as reported by the exchange
//! - Index prices used for manual conversion
//! - Converted balances recording which conversion source was used

mod account_summary;
mod currency_balance;
mod index_price;

pub use account_summary::AccountSummary;
pub use currency_balance::{ConversionSource, CurrencyBalance};
pub use index_price::IndexPrice;

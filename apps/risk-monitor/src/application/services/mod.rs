//! Application Services
//!
//! Run-scoped helpers shared by the use cases.

mod message_renderer;
mod price_resolver;

pub use message_renderer::{
    bold_text, format_crypto, format_pct, format_usd, MessageRenderer, DEFAULT_REPORT_TITLE,
};
pub use price_resolver::PriceResolver;

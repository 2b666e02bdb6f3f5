//! Telegram Notifier
//!
//! Implementation of `NotifierPort` for the Telegram Bot API `sendMessage`
//! method with Markdown parse mode.

mod adapter;
mod config;
mod error;

pub use adapter::TelegramNotifier;
pub use config::{DEFAULT_TELEGRAM_BASE_URL, TelegramConfig};
pub use error::TelegramError;

//! Notifier Adapters
//!
//! Implementations of `NotifierPort`.

mod log;
pub mod telegram;

use async_trait::async_trait;

use crate::application::ports::{NotifierError, NotifierPort};

pub use log::LogNotifier;
pub use telegram::{TelegramConfig, TelegramError, TelegramNotifier};

/// Notifier selected at startup.
#[derive(Debug, Clone)]
pub enum ReportNotifier {
    /// Deliver through the Telegram Bot API.
    Telegram(TelegramNotifier),
    /// Log the message only.
    DryRun(LogNotifier),
}

impl ReportNotifier {
    /// Check if this is the dry-run notifier.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun(_))
    }
}

#[async_trait]
impl NotifierPort for ReportNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifierError> {
        match self {
            Self::Telegram(notifier) => notifier.send(text).await,
            Self::DryRun(notifier) => notifier.send(text).await,
        }
    }
}

//! Telegram adapter configuration.

use std::fmt;
use std::time::Duration;

/// Default Bot API endpoint.
pub const DEFAULT_TELEGRAM_BASE_URL: &str = "https://api.telegram.org";

/// Configuration for the Telegram notifier.
///
/// `Debug` never prints the bot token or chat id.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token.
    pub bot_token: String,
    /// Target chat id.
    pub chat_id: String,
    /// Bot API base URL.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl TelegramConfig {
    /// Create a new configuration against the public Bot API.
    #[must_use]
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            base_url: DEFAULT_TELEGRAM_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `sendMessage` endpoint URL. Contains the token; never log it.
    pub(crate) fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

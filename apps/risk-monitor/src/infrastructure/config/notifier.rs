//! Notifier settings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::infrastructure::notifier::telegram::{DEFAULT_TELEGRAM_BASE_URL, TelegramConfig};

/// Telegram notifier settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct NotifierSettings {
    /// Bot token.
    #[serde(default)]
    pub bot_token: String,
    /// Target chat id.
    #[serde(default)]
    pub chat_id: String,
    /// Bot API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Render and log the message instead of sending it.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            dry_run: false,
        }
    }
}

impl fmt::Debug for NotifierSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierSettings")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl NotifierSettings {
    /// Build the Telegram adapter configuration.
    #[must_use]
    pub fn telegram_config(&self) -> TelegramConfig {
        let base_url = if self.base_url.trim().is_empty() {
            DEFAULT_TELEGRAM_BASE_URL
        } else {
            self.base_url.trim()
        };
        TelegramConfig::new(self.bot_token.trim(), self.chat_id.trim())
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.dry_run {
            return Ok(());
        }
        if self.bot_token.trim().is_empty() || self.chat_id.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar(
                "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "notifier.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_TELEGRAM_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_needs_no_token() {
        let settings = NotifierSettings {
            dry_run: true,
            ..NotifierSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn live_needs_token_and_chat() {
        let settings = NotifierSettings {
            bot_token: "123:abc".to_string(),
            ..NotifierSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn empty_base_url_uses_default() {
        let settings = NotifierSettings {
            base_url: String::new(),
            ..NotifierSettings::default()
        };
        assert_eq!(settings.telegram_config().base_url, DEFAULT_TELEGRAM_BASE_URL);
    }

    #[test]
    fn debug_is_redacted() {
        let settings = NotifierSettings {
            bot_token: "123:very-secret".to_string(),
            chat_id: "-100555".to_string(),
            ..NotifierSettings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("-100555"));
    }
}

//! Telegram-specific error types.

use thiserror::Error;

use crate::application::ports::NotifierError;

/// Errors from the Telegram adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TelegramError {
    /// Non-success HTTP status.
    #[error("HTTP error: {status} - {description}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Bot API description or raw body.
        description: String,
    },

    /// The Bot API answered `ok: false`.
    #[error("Bot API error: {0}")]
    Api(String),

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),
}

impl From<TelegramError> for NotifierError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Api(description) => Self::Rejected {
                message: description,
            },
            TelegramError::Http {
                status,
                description,
            } if (400..500).contains(&status) => Self::Rejected {
                message: format!("{status}: {description}"),
            },
            other => Self::Delivery {
                message: other.to_string(),
            },
        }
    }
}

//! Telegram notifier implementing NotifierPort.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{NotifierError, NotifierPort};

use super::config::TelegramConfig;
use super::error::TelegramError;

/// Parse mode the rendered message is written in.
const PARSE_MODE: &str = "Markdown";

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API notifier.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TelegramError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        // reqwest errors embed the URL, which embeds the token
        let response = self
            .client
            .post(self.config.send_message_url())
            .form(&[
                ("chat_id", self.config.chat_id.as_str()),
                ("text", text),
                ("parse_mode", PARSE_MODE),
            ])
            .send()
            .await
            .map_err(|e| TelegramError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Network(e.without_url().to_string()))?;
        let parsed = serde_json::from_str::<TelegramResponse>(&body);

        if !status.is_success() {
            let description = parsed
                .ok()
                .and_then(|r| r.description)
                .unwrap_or(body);
            return Err(TelegramError::Http {
                status: status.as_u16(),
                description,
            });
        }

        let parsed = parsed.map_err(|e| TelegramError::JsonParse(e.to_string()))?;
        if !parsed.ok {
            return Err(TelegramError::Api(
                parsed
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NotifierPort for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifierError> {
        tracing::debug!(chars = text.chars().count(), "Sending Telegram message");
        self.send_message(text).await.map_err(NotifierError::from)
    }
}

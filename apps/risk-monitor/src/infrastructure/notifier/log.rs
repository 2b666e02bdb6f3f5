//! Dry-run notifier that writes the message to the log.

use async_trait::async_trait;

use crate::application::ports::{NotifierError, NotifierPort};

/// Notifier that logs instead of delivering.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotifierPort for LogNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifierError> {
        tracing::info!(dry_run = true, message = %text, "Report rendered, not sent");
        Ok(())
    }
}

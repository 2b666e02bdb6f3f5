//! Notifier Port (Driven Port)
//!
//! Interface for delivering a rendered report to a chat.

use async_trait::async_trait;

/// Notifier port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifierError {
    /// Transport failure or non-success response.
    #[error("Notification delivery failed: {message}")]
    Delivery {
        /// Error details.
        message: String,
    },

    /// The endpoint accepted the request but refused the message.
    #[error("Notification rejected: {message}")]
    Rejected {
        /// Rejection reason.
        message: String,
    },
}

/// Port for message delivery.
#[async_trait]
pub trait NotifierPort: Send + Sync {
    /// Deliver a Markdown-formatted message.
    async fn send(&self, text: &str) -> Result<(), NotifierError>;
}

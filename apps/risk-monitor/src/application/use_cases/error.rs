//! Report pipeline errors.

use crate::application::ports::{ExchangeError, NotifierError};
use crate::domain::shared::DomainError;

/// Error that aborts a report run.
///
/// No partial report is delivered when any of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// Credentials rejected or the auth call failed.
    #[error("Authentication error: {0}")]
    Auth(#[source] ExchangeError),

    /// A data endpoint failed.
    #[error("Failed to fetch {resource}: {source}")]
    Fetch {
        /// What was being fetched.
        resource: String,
        /// Underlying exchange error.
        #[source]
        source: ExchangeError,
    },

    /// Conversion or metric calculation failed.
    #[error("Report calculation failed: {0}")]
    Calculation(#[from] DomainError),

    /// The rendered message could not be delivered.
    #[error("Notification failed: {0}")]
    Notify(#[from] NotifierError),
}

impl ReportError {
    pub(crate) fn fetch(resource: impl Into<String>) -> impl FnOnce(ExchangeError) -> Self {
        let resource = resource.into();
        move |source| Self::Fetch { resource, source }
    }

    /// Short machine-readable category for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Fetch { .. } => "fetch",
            Self::Calculation(_) => "calculation",
            Self::Notify(_) => "notify",
        }
    }
}

//! Domain errors for the risk monitor.

use thiserror::Error;

/// Domain-level errors that can occur in business logic.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    #[error("Invalid {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// A USD conversion needed an index price that was not supplied.
    #[error("Missing USD index price for {currency}")]
    MissingIndexPrice {
        /// Currency code that could not be converted.
        currency: String,
    },

    /// A currency referenced by the report has no account balance.
    #[error("No account balance for {currency}")]
    MissingBalance {
        /// Currency code.
        currency: String,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidValue`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::invalid("currency", "must not be empty");
        assert_eq!(err.to_string(), "Invalid currency: must not be empty");

        let err = DomainError::MissingIndexPrice {
            currency: "ETH".to_string(),
        };
        assert_eq!(err.to_string(), "Missing USD index price for ETH");

        let err = DomainError::MissingBalance {
            currency: "BTC".to_string(),
        };
        assert_eq!(err.to_string(), "No account balance for BTC");
    }
}

//! Domain-level errors

use thiserror::Error;

/// Errors raised while constructing or validating domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Invalid phone number format
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// One-time password failed the local format check
    #[error("Invalid OTP: {0}")]
    InvalidOtp(String),

    /// Unknown or empty identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Unknown client-side route
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Form validation failed; one message per violated rule
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl DomainError {
    /// Messages suitable for showing to a user, one per problem
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages.clone(),
            Self::InvalidEmailAddress(m)
            | Self::InvalidPhoneNumber(m)
            | Self::InvalidOtp(m)
            | Self::InvalidIdentifier(m)
            | Self::UnknownRoute(m) => vec![m.clone()],
        }
    }
}

//! Email address value object
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("  Alumni@Campus.EDU ").unwrap();
//! assert_eq!(email.as_str(), "alumni@campus.edu");
//! assert!(EmailAddress::new("campus.edu").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// A syntactically valid, lowercased email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress {
    #[validate(email)]
    value: String,
}

impl EmailAddress {
    /// Parse and normalize an email address
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEmailAddress`] when the input is not an email.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let candidate = Self {
            value: raw.into().trim().to_lowercase(),
        };

        if candidate.value.is_empty() {
            return Err(DomainError::InvalidEmailAddress(
                "Email is required".to_string(),
            ));
        }

        candidate
            .validate()
            .map_err(|_| DomainError::InvalidEmailAddress(format!("'{}'", candidate.value)))?;

        Ok(candidate)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes() {
        let email = EmailAddress::new(" Grad@Example.com ").unwrap();
        assert_eq!(email.as_str(), "grad@example.com");
        assert_eq!(email.to_string(), "grad@example.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "   ", "no-at-sign", "@example.com", "user@"] {
            assert!(EmailAddress::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn empty_input_reports_required() {
        let err = EmailAddress::new("").unwrap_err();
        assert_eq!(err, DomainError::InvalidEmailAddress("Email is required".to_string()));
    }

    #[test]
    fn serializes_as_plain_string() {
        let email = EmailAddress::new("a@b.io").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"a@b.io\"");
        let parsed: EmailAddress = serde_json::from_str("\"A@B.io\"").unwrap();
        assert_eq!(parsed, email);
    }

    #[test]
    fn deserializing_invalid_email_fails() {
        assert!(serde_json::from_str::<EmailAddress>("\"nope\"").is_err());
    }
}

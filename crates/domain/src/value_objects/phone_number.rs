//! Ten-digit phone number value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of digits the backend expects in a phone number
pub const PHONE_NUMBER_DIGITS: usize = 10;

/// A phone number of exactly ten ASCII digits (no country prefix)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a phone number, tolerating surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPhoneNumber`] unless the trimmed input is
    /// exactly ten digits.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let value = raw.as_ref().trim();
        if is_valid_phone_number(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidPhoneNumber(
                "Phone number must be 10 digits".to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check the ten-digit rule without allocating
pub fn is_valid_phone_number(value: &str) -> bool {
    value.len() == PHONE_NUMBER_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_digits_are_accepted() {
        let phone = PhoneNumber::new(" 9876543210 ").unwrap();
        assert_eq!(phone.as_str(), "9876543210");
    }

    #[test]
    fn wrong_length_or_symbols_are_rejected() {
        for bad in ["", "12345", "12345678901", "98765-4321", "+919876543210", "98765432a0"] {
            assert!(PhoneNumber::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn error_message_matches_form_hint() {
        let err = PhoneNumber::new("123").unwrap_err();
        assert_eq!(err.messages(), vec!["Phone number must be 10 digits"]);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn any_ten_digit_string_parses(digits in "[0-9]{10}") {
            prop_assert!(PhoneNumber::new(&digits).is_ok());
        }

        #[test]
        fn other_lengths_never_parse(digits in "[0-9]{0,9}|[0-9]{11,14}") {
            prop_assert!(PhoneNumber::new(&digits).is_err());
        }
    }
}

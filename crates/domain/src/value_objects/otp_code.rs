//! One-time password entered during sign-up verification

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Length of the code the backend mails out
pub const OTP_LENGTH: usize = 4;

/// A four-digit one-time password
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OtpCode(String);

impl OtpCode {
    /// Check the code locally before it is ever sent
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOtp`] unless the trimmed input is four digits.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = raw.as_ref().trim();
        if code.chars().count() != OTP_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidOtp(
                "OTP must be a 4-digit number.".to_string(),
            ));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are short-lived credentials; keep them out of logs.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(****)")
    }
}

impl TryFrom<String> for OtpCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OtpCode> for String {
    fn from(code: OtpCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_digits_accepted() {
        assert_eq!(OtpCode::new("0427").unwrap().as_str(), "0427");
    }

    #[test]
    fn three_digits_rejected_with_form_message() {
        let err = OtpCode::new("123").unwrap_err();
        assert_eq!(err.messages(), vec!["OTP must be a 4-digit number."]);
    }

    #[test]
    fn letters_and_long_codes_rejected() {
        assert!(OtpCode::new("12a4").is_err());
        assert!(OtpCode::new("12345").is_err());
        assert!(OtpCode::new("").is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let code = OtpCode::new("9999").unwrap();
        assert_eq!(format!("{code:?}"), "OtpCode(****)");
    }
}

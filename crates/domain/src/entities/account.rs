//! Sign-up, OTP verification and sign-in payloads

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::profile::{Course, Gender};
use crate::errors::DomainError;
use crate::validation::collect_messages;
use crate::value_objects::{EmailAddress, OtpCode, is_valid_phone_number};

/// Backend message returned when the email is already taken
pub const USER_ALREADY_EXISTS: &str = "User already exists";

/// Backend message returned when signing in before OTP verification
pub const USER_NOT_OTP_VERIFIED: &str = "User is not OTP verified";

/// Graduation year pre-filled in the sign-up form
pub const DEFAULT_GRADUATION_YEAR: i32 = 2027;

/// Sign-up form as entered by the user
#[derive(Clone, Validate)]
pub struct SignupForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,
    pub address: String,
    pub course: Option<Course>,
    pub designation: String,
    pub gender: Option<Gender>,
    pub graduation_year: Option<i32>,
    pub roll_number: String,
    #[validate(custom(function = "empty_or_phone", message = "Phone number must be 10 digits"))]
    pub phone_number: String,
}

const SIGNUP_FIELDS: &[&str] = &["email", "password", "name", "phone_number"];

impl SignupForm {
    /// A blank form with the defaults the page starts from
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            address: String::new(),
            course: None,
            designation: String::new(),
            gender: None,
            graduation_year: Some(DEFAULT_GRADUATION_YEAR),
            roll_number: String::new(),
            phone_number: String::new(),
        }
    }

    /// Validate and convert into the wire request
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] listing every violated rule.
    pub fn into_request(mut self) -> Result<SignupRequest, DomainError> {
        self.email = self.email.trim().to_string();
        if let Err(errors) = self.validate() {
            return Err(DomainError::Validation(collect_messages(&errors, SIGNUP_FIELDS)));
        }

        Ok(SignupRequest {
            email: EmailAddress::new(self.email)?,
            password: self.password,
            name: self.name.trim().to_string(),
            addr: self.address,
            course: self.course,
            designation: self.designation,
            gender: self.gender,
            gradyear: self.graduation_year,
            rollno: self.roll_number,
            phonenumber: self.phone_number.trim().to_string(),
        })
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("course", &self.course)
            .field("graduation_year", &self.graduation_year)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/signup`
#[derive(Clone, Serialize)]
pub struct SignupRequest {
    pub email: EmailAddress,
    pub password: String,
    pub name: String,
    pub addr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
    pub designation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradyear: Option<i32>,
    pub rollno: String,
    pub phonenumber: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: String,
}

/// Body of `PUT /auth/verifyotp`
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: EmailAddress,
    pub otp: OtpCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Sign-in form
#[derive(Clone, Validate)]
pub struct SignInForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for a malformed email or empty password.
    pub fn into_request(mut self) -> Result<SignInRequest, DomainError> {
        self.email = self.email.trim().to_string();
        if let Err(errors) = self.validate() {
            return Err(DomainError::Validation(collect_messages(
                &errors,
                &["email", "password"],
            )));
        }
        Ok(SignInRequest {
            email: EmailAddress::new(self.email)?,
            password: self.password,
        })
    }
}

impl fmt::Debug for SignInForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/signin`
#[derive(Clone, Serialize)]
pub struct SignInRequest {
    pub email: EmailAddress,
    pub password: String,
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "access_token")]
    pub access_token: String,
    #[serde(default)]
    pub is_profile_completed: Option<bool>,
}

impl SignInResponse {
    /// Older backends omit the flag; treat that as a completed profile
    pub fn profile_completed(&self) -> bool {
        self.is_profile_completed.unwrap_or(true)
    }
}

impl fmt::Debug for SignInResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInResponse")
            .field("message", &self.message)
            .field("access_token", &"[REDACTED]")
            .field("is_profile_completed", &self.is_profile_completed)
            .finish()
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

fn empty_or_phone(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || is_valid_phone_number(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

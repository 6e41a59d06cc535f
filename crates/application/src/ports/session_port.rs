//! Client session port
//!
//! Typed access to the locally persisted session: the bearer token and the
//! email awaiting OTP verification.

use domain::EmailAddress;
#[cfg(test)]
use mockall::automock;
use secrecy::SecretString;

use crate::error::ApplicationError;

#[cfg_attr(test, automock)]
pub trait SessionPort: Send + Sync {
    fn access_token(&self) -> Option<SecretString>;

    fn store_access_token(&self, token: &str) -> Result<(), ApplicationError>;

    fn clear_access_token(&self) -> Result<(), ApplicationError>;

    /// Email saved at sign-up, until its OTP is verified
    fn pending_email(&self) -> Option<EmailAddress>;

    fn store_pending_email(&self, email: &EmailAddress) -> Result<(), ApplicationError>;

    fn clear_pending_email(&self) -> Result<(), ApplicationError>;

    fn is_authenticated(&self) -> bool;
}

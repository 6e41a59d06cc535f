//! Value Objects - Immutable, identity-less domain primitives

mod email_address;
mod event_id;
mod otp_code;
mod phone_number;

pub use email_address::EmailAddress;
pub use event_id::EventId;
pub use otp_code::{OTP_LENGTH, OtpCode};
pub use phone_number::{PHONE_NUMBER_DIGITS, PhoneNumber, is_valid_phone_number};

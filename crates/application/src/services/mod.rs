//! Use cases behind each portal page

mod admin_service;
mod auth_service;
mod dashboard_service;
mod outcome;
mod profile_service;

pub use admin_service::{ADMIN_LOAD_FAILED, AdminService};
pub use auth_service::{
    AuthService, EMAIL_ALREADY_REGISTERED, INVALID_OTP, NO_PENDING_EMAIL, OTP_FAILED, OTP_FORMAT,
    OTP_VERIFIED, VERIFY_OTP_FIRST,
};
pub use dashboard_service::{
    ALREADY_REGISTERED, DashboardService, LOAD_FAILED, REGISTERED, REGISTRATION_FAILED,
    SONG_FAILED, SONG_UNAUTHORIZED,
};
pub use outcome::{INVALID_REQUEST, NETWORK_ERROR, Outcome, SERVER_ERROR, SOMETHING_WENT_WRONG};
pub use profile_service::{
    PROFILE_UNAUTHORIZED, PROFILE_UPDATE_FAILED, PROFILE_UPDATED, ProfileService, SIGNED_OUT,
};

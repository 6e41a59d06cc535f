//! Sign-up, OTP verification, sign-in and logout

use std::fmt;
use std::sync::Arc;

use domain::{
    OtpCode, Route, RouteGuard, SignInForm, SignupForm, USER_ALREADY_EXISTS,
    USER_NOT_OTP_VERIFIED, VerifyOtpRequest,
};
use tracing::{debug, error, info, instrument, warn};

use super::outcome::{Outcome, SOMETHING_WENT_WRONG, form_failure};
use crate::error::ApplicationError;
use crate::ports::{PortalPort, SessionPort};

pub const EMAIL_ALREADY_REGISTERED: &str = "This email is already registered. Try logging in.";
pub const VERIFY_OTP_FIRST: &str = "Please verify your OTP first.";
pub const NO_PENDING_EMAIL: &str = "No email found! Redirecting to Sign Up...";
pub const OTP_FORMAT: &str = "OTP must be a 4-digit number.";
pub const OTP_VERIFIED: &str = "OTP Verification Successful. Redirecting to Login page...";
pub const INVALID_OTP: &str = "Invalid OTP. Please try again.";
pub const OTP_FAILED: &str = "Something went wrong. Try again.";

/// Account lifecycle use cases
pub struct AuthService {
    portal: Arc<dyn PortalPort>,
    session: Arc<dyn SessionPort>,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(portal: Arc<dyn PortalPort>, session: Arc<dyn SessionPort>) -> Self {
        Self { portal, session }
    }

    /// Register a new account and remember its email for OTP verification
    #[instrument(skip_all)]
    pub async fn sign_up(&self, form: SignupForm) -> Outcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return Outcome::errors(e.messages()),
        };

        match self.portal.sign_up(&request).await {
            Ok(response) => {
                if let Err(e) = self.session.store_pending_email(&request.email) {
                    error!(error = %e, "Failed to remember email for OTP verification");
                    return Outcome::error(SOMETHING_WENT_WRONG);
                }
                info!(email = %request.email, "Account created, awaiting OTP");
                Outcome::success(response.message).navigate(Route::VerifyOtp)
            },
            Err(e) => {
                warn!(error = %e, "Sign-up failed");
                form_failure(&e, &[(USER_ALREADY_EXISTS, EMAIL_ALREADY_REGISTERED)])
            },
        }
    }

    /// Confirm the emailed OTP for the email saved at sign-up
    #[instrument(skip_all)]
    pub async fn verify_otp(&self, code: &str) -> Outcome {
        let Some(email) = self.session.pending_email() else {
            return Outcome::error(NO_PENDING_EMAIL).navigate(Route::Signup);
        };

        let Ok(otp) = OtpCode::new(code) else {
            debug!("Rejected malformed OTP before sending");
            return Outcome::error(OTP_FORMAT);
        };

        let request = VerifyOtpRequest { email, otp };
        match self.portal.verify_otp(&request).await {
            Ok(response) => {
                if let Err(e) = self.session.clear_pending_email() {
                    warn!(error = %e, "Failed to clear pending email");
                }
                let text = response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| OTP_VERIFIED.to_string());
                Outcome::success(text).navigate(Route::SignIn)
            },
            Err(ApplicationError::SessionExpired { .. }) => Outcome::error(INVALID_OTP),
            Err(e) => {
                warn!(error = %e, "OTP verification failed");
                Outcome::error(OTP_FAILED)
            },
        }
    }

    /// Sign in and store the access token
    ///
    /// Lands on the dashboard unless the backend reports an incomplete profile.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, form: SignInForm) -> Outcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return Outcome::errors(e.messages()),
        };

        match self.portal.sign_in(&request).await {
            Ok(response) => {
                if let Err(e) = self.session.store_access_token(&response.access_token) {
                    error!(error = %e, "Failed to store access token");
                    return Outcome::error(SOMETHING_WENT_WRONG);
                }
                let next = if response.profile_completed() {
                    Route::Dashboard
                } else {
                    Route::ProfileUpdate
                };
                info!(next = %next, "Signed in");
                Outcome::success(response.message).navigate(next)
            },
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                form_failure(&e, &[(USER_NOT_OTP_VERIFIED, VERIFY_OTP_FIRST)])
            },
        }
    }

    /// Forget the access token and go home
    pub fn logout(&self) -> Outcome {
        if let Err(e) = self.session.clear_access_token() {
            warn!(error = %e, "Failed to clear access token");
        }
        Outcome::default().navigate(Route::Home)
    }

    /// Where a request for `requested` actually lands
    pub fn guard(&self, requested: Route) -> Route {
        RouteGuard::resolve(requested, self.session.is_authenticated())
    }
}

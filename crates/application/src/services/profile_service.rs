//! Profile completion and the signed-in user's profile

use std::fmt;
use std::sync::Arc;

use domain::{ProfileForm, Route, UserAccount};
use tracing::{instrument, warn};

use super::outcome::{NETWORK_ERROR, Outcome};
use crate::error::{ApplicationError, Rejection};
use crate::ports::PortalPort;

pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const PROFILE_UNAUTHORIZED: &str = "Unauthorized! Please login again.";
pub const PROFILE_UPDATE_FAILED: &str = "An error occurred. Please try again later.";
pub const SIGNED_OUT: &str = "You've been signed out. Please sign in again.";

pub struct ProfileService {
    portal: Arc<dyn PortalPort>,
}

impl fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileService").finish_non_exhaustive()
    }
}

impl ProfileService {
    pub fn new(portal: Arc<dyn PortalPort>) -> Self {
        Self { portal }
    }

    /// Fill in the profile details left out at sign-up
    #[instrument(skip_all)]
    pub async fn complete_profile(&self, form: ProfileForm) -> Outcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return Outcome::errors(e.messages()),
        };

        match self.portal.complete_profile(&request).await {
            Ok(_) => Outcome::success(PROFILE_UPDATED).navigate(Route::Dashboard),
            Err(e) => {
                warn!(error = %e, "Profile update failed");
                match e {
                    ApplicationError::Validation(messages) => Outcome::errors(messages),
                    ApplicationError::SessionExpired { .. } => Outcome::error(PROFILE_UNAUTHORIZED),
                    ApplicationError::Rejected {
                        status: 400,
                        reason: reason @ (Rejection::Message(_) | Rejection::FieldErrors(_)),
                    } => Outcome::errors(reason.messages()),
                    ApplicationError::Unreachable(_) => Outcome::error(NETWORK_ERROR),
                    _ => Outcome::error(PROFILE_UPDATE_FAILED),
                }
            },
        }
    }

    /// The signed-in user's account; any failure sends the user back out
    #[instrument(skip_all)]
    pub async fn my_profile(&self) -> Outcome<UserAccount> {
        match self.portal.my_profile().await {
            Ok(response) => match response.user {
                Some(user) => Outcome::loaded(user),
                None => {
                    warn!("Profile response carried no user");
                    Outcome::error(SIGNED_OUT).navigate(Route::SESSION_LOST)
                },
            },
            Err(e) => {
                warn!(error = %e, "Failed to load profile");
                Outcome::error(SIGNED_OUT).navigate(Route::SESSION_LOST)
            },
        }
    }
}

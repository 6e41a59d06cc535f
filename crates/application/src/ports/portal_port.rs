//! Portal backend port
//!
//! Every backend operation the use cases need. The adapter maps transport
//! failures onto [`ApplicationError`] and has already cleared the session
//! when it returns [`ApplicationError::SessionExpired`].

use async_trait::async_trait;
use domain::{
    CourseCount, Event, EventId, FoodPreferenceCount, GenderCount, GradYearCount,
    ProfileUpdateRequest, ProfileUpdateResponse, SignInRequest, SignInResponse, SignupRequest,
    SignupResponse, SingingRequest, UserAccount, UserActivities, UserProfileResponse,
    VerifyOtpRequest, VerifyOtpResponse,
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PortalPort: Send + Sync {
    async fn sign_up(&self, request: &SignupRequest) -> Result<SignupResponse, ApplicationError>;

    async fn verify_otp(
        &self,
        request: &VerifyOtpRequest,
    ) -> Result<VerifyOtpResponse, ApplicationError>;

    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, ApplicationError>;

    async fn complete_profile(
        &self,
        request: &ProfileUpdateRequest,
    ) -> Result<ProfileUpdateResponse, ApplicationError>;

    /// Profile of the signed-in user
    async fn my_profile(&self) -> Result<UserProfileResponse, ApplicationError>;

    /// All events, served from cache when fresh
    async fn events(&self) -> Result<Vec<Event>, ApplicationError>;

    /// The signed-in user's activities, served from cache when fresh
    async fn user_activities(&self) -> Result<UserActivities, ApplicationError>;

    /// Reload the signed-in user's activities, bypassing the cache
    async fn refresh_user_activities(&self) -> Result<UserActivities, ApplicationError>;

    async fn join_event(&self, event_id: &EventId) -> Result<(), ApplicationError>;

    async fn add_song(&self, request: &SingingRequest) -> Result<(), ApplicationError>;

    async fn food_preference_count(&self) -> Result<FoodPreferenceCount, ApplicationError>;

    async fn gender_count(&self) -> Result<GenderCount, ApplicationError>;

    async fn graduation_year_count(&self) -> Result<GradYearCount, ApplicationError>;

    async fn course_count(&self) -> Result<Vec<CourseCount>, ApplicationError>;

    async fn all_users(&self) -> Result<Vec<UserAccount>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_port_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PortalPort>();
    }
}

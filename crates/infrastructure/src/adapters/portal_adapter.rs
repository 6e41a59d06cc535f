//! Adapter: application `PortalPort` over `integration_portal::PortalClient`
//!
//! Reads go through the client's keyed cache; writes are one-shot mutations.

use std::fmt;
use std::sync::Arc;

use application::error::{ApplicationError, Rejection};
use application::ports::PortalPort;
use async_trait::async_trait;
use domain::{
    CourseCount, Event, EventId, FoodPreferenceCount, GenderCount, GradYearCount,
    ProfileUpdateRequest, ProfileUpdateResponse, SignInRequest, SignInResponse, SignupRequest,
    SignupResponse, SingingRequest, UserAccount, UserActivities, UserProfileResponse,
    VerifyOtpRequest, VerifyOtpResponse,
};
use integration_portal::{
    ApiError, PortalClient, PortalConfig, RequestDescriptor, ServerMessage, SessionStore,
    endpoints,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

/// Cache keys of the reads the portal issues
pub mod query_keys {
    pub const EVENTS: &str = "events";
    pub const USER_ACTIVITIES: &str = "user-activities";
    pub const USER_PROFILE: &str = "user-profile";
    pub const FOOD_PREFERENCE_COUNT: &str = "admin-food-preference";
    pub const GENDER_COUNT: &str = "admin-gender";
    pub const GRAD_YEAR_COUNT: &str = "admin-graduation-year";
    pub const COURSE_COUNT: &str = "course-count";
    pub const ALL_USERS: &str = "admin-users";
}

#[derive(Clone)]
pub struct PortalAdapter {
    client: PortalClient,
}

impl fmt::Debug for PortalAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalAdapter")
            .field("client", &self.client)
            .finish()
    }
}

impl PortalAdapter {
    pub const fn new(client: PortalClient) -> Self {
        Self { client }
    }

    /// Build the underlying client as well
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] for an invalid configuration.
    pub fn from_config(
        config: PortalConfig,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ApplicationError> {
        PortalClient::new(config, session)
            .map(Self::new)
            .map_err(map_api_error)
    }

    pub const fn client(&self) -> &PortalClient {
        &self.client
    }

    async fn read<T: DeserializeOwned>(
        &self,
        key: &str,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApplicationError> {
        self.client
            .query(key, &descriptor)
            .await
            .map_err(map_api_error)
    }

    async fn write<T, B>(&self, descriptor: RequestDescriptor, body: &B) -> Result<T, ApplicationError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.client
            .mutation::<T>(descriptor)
            .map_err(map_api_error)?
            .trigger_with(body)
            .await
            .map_err(map_api_error)
    }

    fn activities_descriptor() -> RequestDescriptor {
        RequestDescriptor::read(endpoints::USER_ACTIVITIES).authenticated()
    }
}

/// Fold transport failures into the application taxonomy
pub fn map_api_error(error: ApiError) -> ApplicationError {
    match error {
        ApiError::Network(message) => ApplicationError::Unreachable(message),
        e @ ApiError::Timeout { .. } => ApplicationError::Unreachable(e.to_string()),
        ApiError::Unauthorized { message } => ApplicationError::SessionExpired {
            reason: rejection(message),
        },
        ApiError::Status { status, message } if status >= 500 => ApplicationError::ServerFault {
            status,
            reason: rejection(message),
        },
        ApiError::Status { status, message } => ApplicationError::Rejected {
            status,
            reason: rejection(message),
        },
        ApiError::Decode(message) => {
            ApplicationError::Internal(format!("Unexpected response from server: {message}"))
        },
        ApiError::InvalidRequest(message) => ApplicationError::Internal(message),
        ApiError::Configuration(message) => ApplicationError::Configuration(message),
        ApiError::Cancelled => ApplicationError::Internal("Request cancelled".to_string()),
    }
}

fn rejection(message: Option<ServerMessage>) -> Rejection {
    match message {
        None => Rejection::Unspecified,
        Some(ServerMessage::Single(m)) if m.trim().is_empty() => Rejection::Unspecified,
        Some(ServerMessage::Single(m)) => Rejection::Message(m),
        Some(ServerMessage::Many(list)) => Rejection::FieldErrors(list),
    }
}

#[async_trait]
impl PortalPort for PortalAdapter {
    #[instrument(skip_all)]
    async fn sign_up(&self, request: &SignupRequest) -> Result<SignupResponse, ApplicationError> {
        self.write(RequestDescriptor::create(endpoints::SIGNUP), request)
            .await
    }

    #[instrument(skip_all)]
    async fn verify_otp(
        &self,
        request: &VerifyOtpRequest,
    ) -> Result<VerifyOtpResponse, ApplicationError> {
        let response: Option<VerifyOtpResponse> = self
            .write(RequestDescriptor::replace(endpoints::VERIFY_OTP), request)
            .await?;
        Ok(response.unwrap_or_default())
    }

    #[instrument(skip_all)]
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, ApplicationError> {
        let response = self
            .write(RequestDescriptor::create(endpoints::SIGNIN), request)
            .await?;
        // Reads cached for a previous user must not leak into this session
        self.client.clear_cache();
        Ok(response)
    }

    #[instrument(skip_all)]
    async fn complete_profile(
        &self,
        request: &ProfileUpdateRequest,
    ) -> Result<ProfileUpdateResponse, ApplicationError> {
        let response: Option<ProfileUpdateResponse> = self
            .write(
                RequestDescriptor::replace(endpoints::COMPLETE_PROFILE).authenticated(),
                request,
            )
            .await?;
        self.client
            .invalidate(
                query_keys::USER_PROFILE,
                &RequestDescriptor::read(endpoints::USER_PROFILE).authenticated(),
            )
            .await;
        Ok(response.unwrap_or_default())
    }

    async fn my_profile(&self) -> Result<UserProfileResponse, ApplicationError> {
        self.read(
            query_keys::USER_PROFILE,
            RequestDescriptor::read(endpoints::USER_PROFILE).authenticated(),
        )
        .await
    }

    async fn events(&self) -> Result<Vec<Event>, ApplicationError> {
        self.read(
            query_keys::EVENTS,
            RequestDescriptor::read(endpoints::EVENTS).authenticated(),
        )
        .await
    }

    async fn user_activities(&self) -> Result<UserActivities, ApplicationError> {
        self.read(query_keys::USER_ACTIVITIES, Self::activities_descriptor())
            .await
    }

    async fn refresh_user_activities(&self) -> Result<UserActivities, ApplicationError> {
        debug!("Refetching user activities");
        self.client
            .refetch(query_keys::USER_ACTIVITIES, &Self::activities_descriptor())
            .await
            .map_err(map_api_error)
    }

    #[instrument(skip(self), fields(event = %event_id))]
    async fn join_event(&self, event_id: &EventId) -> Result<(), ApplicationError> {
        self.client
            .mutation::<Value>(
                RequestDescriptor::create(endpoints::join_event(event_id)).authenticated(),
            )
            .map_err(map_api_error)?
            .trigger()
            .await
            .map(drop)
            .map_err(map_api_error)
    }

    #[instrument(skip_all)]
    async fn add_song(&self, request: &SingingRequest) -> Result<(), ApplicationError> {
        self.write::<Value, _>(
            RequestDescriptor::create(endpoints::SONGS).authenticated(),
            request,
        )
        .await
        .map(drop)
    }

    async fn food_preference_count(&self) -> Result<FoodPreferenceCount, ApplicationError> {
        self.read(
            query_keys::FOOD_PREFERENCE_COUNT,
            RequestDescriptor::read(endpoints::FOOD_PREFERENCE_COUNT).authenticated(),
        )
        .await
    }

    async fn gender_count(&self) -> Result<GenderCount, ApplicationError> {
        self.read(
            query_keys::GENDER_COUNT,
            RequestDescriptor::read(endpoints::GENDER_COUNT).authenticated(),
        )
        .await
    }

    async fn graduation_year_count(&self) -> Result<GradYearCount, ApplicationError> {
        self.read(
            query_keys::GRAD_YEAR_COUNT,
            RequestDescriptor::read(endpoints::GRAD_YEAR_COUNT).authenticated(),
        )
        .await
    }

    async fn course_count(&self) -> Result<Vec<CourseCount>, ApplicationError> {
        self.read(
            query_keys::COURSE_COUNT,
            RequestDescriptor::read(endpoints::COURSE_COUNT).authenticated(),
        )
        .await
    }

    async fn all_users(&self) -> Result<Vec<UserAccount>, ApplicationError> {
        self.read(
            query_keys::ALL_USERS,
            RequestDescriptor::read(endpoints::ALL_USERS).authenticated(),
        )
        .await
    }
}

//! Entities and payloads exchanged with the portal backend

mod account;
mod admin;
mod event;
mod profile;

pub use account::{
    DEFAULT_GRADUATION_YEAR, SignInForm, SignInRequest, SignInResponse, SignupForm,
    SignupRequest, SignupResponse, USER_ALREADY_EXISTS, USER_NOT_OTP_VERIFIED, VerifyOtpRequest,
    VerifyOtpResponse,
};
pub use admin::{
    AdminDashboard, AdminSnapshot, AlumniRow, ChartColor, ChartSlice, CourseCount, EMPTY_CELL,
    EventRow, FoodPreferenceCount, GenderCount, GradYearBucket, GradYearCount, GradYearTally,
    Table, TableRow,
};
pub use event::{
    ALREADY_JOINED, DashboardView, Event, EventParticipation, JoinedActivity, Participant,
    SINGING_EVENT, Song, SongForm, SingingRequest, UserActivities,
};
pub use profile::{
    Course, FoodPreference, Gender, MAX_GRADUATION_YEAR, ProfileDetails, ProfileForm,
    ProfileUpdateRequest, ProfileUpdateResponse, UserAccount, UserProfileResponse,
};

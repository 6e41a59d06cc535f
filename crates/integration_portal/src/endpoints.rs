//! Backend routes consumed by the portal

use domain::EventId;

pub const SIGNUP: &str = "/auth/signup";
pub const VERIFY_OTP: &str = "/auth/verifyotp";
pub const SIGNIN: &str = "/auth/signin";
pub const COMPLETE_PROFILE: &str = "/completeprofiledetails";
pub const USER_PROFILE: &str = "/user/me";

pub const EVENTS: &str = "/events";
pub const USER_ACTIVITIES: &str = "/events/user/activities";
pub const SONGS: &str = "/events/songs";
pub const COURSE_COUNT: &str = "/events/user/course";

pub const FOOD_PREFERENCE_COUNT: &str = "/admin/foodpreference";
pub const GENDER_COUNT: &str = "/admin/gender";
pub const GRAD_YEAR_COUNT: &str = "/admin/gradyear";
pub const ALL_USERS: &str = "/admin/users";

/// `POST /events/{id}/join`
pub fn join_event(id: &EventId) -> String {
    format!("{EVENTS}/{id}/join")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_path_embeds_event_id() {
        let id = EventId::new("evt-42").unwrap();
        assert_eq!(join_event(&id), "/events/evt-42/join");
    }
}

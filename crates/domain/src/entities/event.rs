//! Events, the user's participation, and singing entries

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::profile::ProfileDetails;
use crate::errors::DomainError;
use crate::validation::collect_messages;
use crate::value_objects::EventId;

/// Activity name the backend files song entries under
pub const SINGING_EVENT: &str = "Singing";

/// Backend message returned when joining an event twice
pub const ALREADY_JOINED: &str = "User already joined the activity";

/// An event users can register for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub event_name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Only populated on the admin listing
    #[serde(default)]
    pub user_activities: Vec<EventParticipation>,
}

/// One user's registration for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParticipation {
    pub id: String,
    #[serde(default)]
    pub user: Option<Participant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub email: String,
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
}

impl Participant {
    /// Profile name, falling back to the email when no profile exists yet
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

/// An event the current user has joined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedActivity {
    pub id: String,
    pub event: Event,
}

/// A song the current user has put forward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub song_details: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default, rename = "needKaroke")]
    pub need_karaoke: bool,
}

/// Response of `GET /events/user/activities`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserActivities {
    pub joined_activities: Vec<JoinedActivity>,
    pub added_activities: Vec<Song>,
}

impl UserActivities {
    pub fn joined_event_ids(&self) -> HashSet<&EventId> {
        self.joined_activities.iter().map(|a| &a.event.id).collect()
    }
}

/// What the event dashboard shows, split by tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    /// Events the user has not joined yet
    pub upcoming: Vec<Event>,
    pub participated: Vec<Event>,
    pub songs: Vec<Song>,
}

impl DashboardView {
    pub fn build(events: &[Event], activities: &UserActivities) -> Self {
        let joined = activities.joined_event_ids();
        let upcoming = events
            .iter()
            .filter(|e| !joined.contains(&e.id))
            .cloned()
            .collect();

        Self {
            upcoming,
            participated: activities
                .joined_activities
                .iter()
                .map(|a| a.event.clone())
                .collect(),
            songs: activities.added_activities.clone(),
        }
    }
}

/// "Add a song" form on the dashboard
#[derive(Debug, Clone, Default, Validate)]
pub struct SongForm {
    #[validate(length(min = 1, message = "Song details are required"))]
    pub song_details: String,
    pub topic: Option<String>,
    pub need_karaoke: bool,
}

impl SongForm {
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the song details are blank.
    pub fn into_request(self) -> Result<SingingRequest, DomainError> {
        let trimmed = Self {
            song_details: self.song_details.trim().to_string(),
            ..self
        };
        if let Err(errors) = trimmed.validate() {
            return Err(DomainError::Validation(collect_messages(&errors, &["song_details"])));
        }

        Ok(SingingRequest {
            event: SINGING_EVENT.to_string(),
            song_details: trimmed.song_details,
            // An empty topic field means "no topic"
            topic: trimmed.topic.filter(|t| !t.trim().is_empty()),
            need_karaoke: trimmed.need_karaoke,
        })
    }
}

/// Body of `POST /events/songs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingingRequest {
    pub event: String,
    pub song_details: String,
    pub topic: Option<String>,
    #[serde(rename = "needKaroke")]
    pub need_karaoke: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, name: &str) -> Event {
        Event {
            id: EventId::new(id).unwrap(),
            event_name: name.to_string(),
            about: String::new(),
            created_at: None,
            updated_at: None,
            user_activities: Vec::new(),
        }
    }

    #[test]
    fn dashboard_hides_joined_events_from_upcoming() {
        let events = vec![event("e1", "Reunion"), event("e2", "Quiz"), event("e3", "Gala")];
        let activities = UserActivities {
            joined_activities: vec![JoinedActivity {
                id: "a1".to_string(),
                event: event("e2", "Quiz"),
            }],
            added_activities: Vec::new(),
        };

        let view = DashboardView::build(&events, &activities);
        let upcoming: Vec<_> = view.upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(upcoming, vec!["e1", "e3"]);
        assert_eq!(view.participated.len(), 1);
        assert_eq!(view.participated[0].event_name, "Quiz");
    }

    #[test]
    fn user_activities_parse_backend_shape() {
        let json = r#"{
            "joinedActivities": [
                { "id": "a1", "event": { "id": "e1", "eventName": "Reunion", "about": "Annual meetup" } }
            ],
            "addedActivities": [
                { "id": "s1", "songDetails": "Yesterday - The Beatles", "topic": null, "needKaroke": true }
            ]
        }"#;
        let parsed: UserActivities = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.joined_activities[0].event.event_name, "Reunion");
        assert!(parsed.added_activities[0].need_karaoke);
        assert!(parsed.added_activities[0].topic.is_none());
    }

    #[test]
    fn song_form_fills_singing_event_and_drops_empty_topic() {
        let form = SongForm {
            song_details: "  Imagine - John Lennon ".to_string(),
            topic: Some(String::new()),
            need_karaoke: false,
        };
        let request = form.into_request().unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "Singing",
                "songDetails": "Imagine - John Lennon",
                "topic": null,
                "needKaroke": false
            })
        );
    }

    #[test]
    fn blank_song_is_rejected() {
        let err = SongForm::default().into_request().unwrap_err();
        assert_eq!(err.messages(), vec!["Song details are required"]);
    }

    #[test]
    fn participant_name_falls_back_to_email() {
        let p = Participant {
            email: "x@y.z".to_string(),
            profile: None,
        };
        assert_eq!(p.display_name(), "x@y.z");
    }
}

//! Event dashboard: listing, registration and song requests

use std::fmt;
use std::sync::Arc;

use domain::{ALREADY_JOINED, DashboardView, EventId, Notice, SongForm};
use tracing::{debug, info, instrument, warn};

use super::outcome::Outcome;
use crate::error::ApplicationError;
use crate::ports::PortalPort;

pub const REGISTERED: &str = "Successfully registered for the event!";
pub const ALREADY_REGISTERED: &str = "You are already registered for this event.";
pub const REGISTRATION_FAILED: &str = "Failed to register for the event.";
pub const SONG_UNAUTHORIZED: &str = "Unauthorized. Please log in again.";
pub const SONG_FAILED: &str = "Failed to add song.";
pub const LOAD_FAILED: &str = "Failed to load events or activities.";

pub struct DashboardService {
    portal: Arc<dyn PortalPort>,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}

impl DashboardService {
    pub fn new(portal: Arc<dyn PortalPort>) -> Self {
        Self { portal }
    }

    /// Load events and the user's activities together
    #[instrument(skip_all)]
    pub async fn load(&self) -> Outcome<DashboardView> {
        let loaded = futures::try_join!(self.portal.events(), self.portal.user_activities());

        match loaded {
            Ok((events, activities)) => {
                let view = DashboardView::build(&events, &activities);
                debug!(
                    upcoming = view.upcoming.len(),
                    participated = view.participated.len(),
                    songs = view.songs.len(),
                    "Dashboard loaded"
                );
                Outcome::loaded(view)
            },
            Err(e) => {
                warn!(error = %e, "Dashboard load failed");
                Outcome::error(LOAD_FAILED)
            },
        }
    }

    #[instrument(skip(self), fields(event = %event_id))]
    pub async fn register(&self, event_id: &EventId) -> Outcome {
        match self.portal.join_event(event_id).await {
            Ok(()) => {
                info!("Registered for event");
                self.refresh_activities().await;
                Outcome::success(REGISTERED)
            },
            Err(e) if e.server_message().as_deref() == Some(ALREADY_JOINED) => {
                Outcome::notice(Notice::info(ALREADY_REGISTERED))
            },
            Err(e) => {
                warn!(error = %e, "Event registration failed");
                Outcome::error(
                    e.server_message()
                        .unwrap_or_else(|| REGISTRATION_FAILED.to_string()),
                )
            },
        }
    }

    /// Request a song for the singing event
    #[instrument(skip_all)]
    pub async fn add_song(&self, form: SongForm) -> Outcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return Outcome::errors(e.messages()),
        };

        match self.portal.add_song(&request).await {
            Ok(()) => {
                self.refresh_activities().await;
                Outcome::success(format!(
                    "Song \"{}\" added successfully!",
                    request.song_details
                ))
            },
            Err(ApplicationError::SessionExpired { .. }) => Outcome::error(SONG_UNAUTHORIZED),
            Err(e) => {
                warn!(error = %e, "Adding song failed");
                Outcome::error(e.server_message().unwrap_or_else(|| SONG_FAILED.to_string()))
            },
        }
    }

    async fn refresh_activities(&self) {
        if let Err(e) = self.portal.refresh_user_activities().await {
            warn!(error = %e, "Failed to refresh user activities");
        }
    }
}

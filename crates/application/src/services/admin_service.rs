//! Admin statistics dashboard

use std::fmt;
use std::sync::Arc;

use domain::{AdminDashboard, AdminSnapshot, Route};
use tracing::{info, instrument, warn};

use super::outcome::Outcome;
use crate::ports::PortalPort;

pub const ADMIN_LOAD_FAILED: &str = "Unauthorized or failed to load data. Please sign in again.";

pub struct AdminService {
    portal: Arc<dyn PortalPort>,
}

impl fmt::Debug for AdminService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminService").finish_non_exhaustive()
    }
}

impl AdminService {
    pub fn new(portal: Arc<dyn PortalPort>) -> Self {
        Self { portal }
    }

    /// Fetch every admin statistic concurrently and shape the dashboard
    ///
    /// A single failed fetch fails the whole load.
    #[instrument(skip_all)]
    pub async fn load(&self) -> Outcome<AdminDashboard> {
        let fetched = futures::try_join!(
            self.portal.food_preference_count(),
            self.portal.gender_count(),
            self.portal.graduation_year_count(),
            self.portal.course_count(),
            self.portal.all_users(),
            self.portal.events(),
        );

        match fetched {
            Ok((food, gender, graduation_years, courses, alumni, events)) => {
                let snapshot = AdminSnapshot {
                    food,
                    gender,
                    graduation_years,
                    courses,
                    alumni,
                    events,
                };
                let dashboard = AdminDashboard::build(&snapshot);
                info!(
                    alumni = dashboard.total_alumni(),
                    events = dashboard.events.len(),
                    "Admin dashboard loaded"
                );
                Outcome::loaded(dashboard)
            },
            Err(e) => {
                warn!(error = %e, "Admin dashboard load failed");
                Outcome::error(ADMIN_LOAD_FAILED).navigate(Route::SESSION_LOST)
            },
        }
    }
}

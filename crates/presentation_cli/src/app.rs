//! Wiring and command dispatch

use std::sync::Arc;

use anyhow::Context;
use application::{
    AdminService, AuthService, DashboardService, Outcome, ProfileService, SessionPort,
};
use chrono::Utc;
use domain::{Countdown, EventId, Route, SignInForm, SongForm};
use infrastructure::{AppConfig, FileSessionStore, PortalAdapter, SessionAdapter};
use integration_portal::{InMemorySessionStore, SessionEvent, SessionStore};
use tokio::sync::broadcast::Receiver;
use tracing::{debug, info};

use crate::cli::Commands;
use crate::render;

/// What a command printed and whether it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: String,
    pub failed: bool,
}

impl Report {
    fn from_outcome<T>(outcome: &Outcome<T>, body: Option<String>) -> Self {
        let mut output = render::notices(&outcome.notices);
        if let Some(body) = body {
            output.push_str(&body);
        }
        output.push_str(&render::navigation(outcome.navigate_to));
        Self {
            output,
            failed: outcome.has_errors(),
        }
    }

    fn plain(output: String) -> Self {
        Self {
            output,
            failed: false,
        }
    }
}

/// The hosting application: services over the real adapters
#[derive(Debug)]
pub struct App {
    portal: Arc<PortalAdapter>,
    session: Arc<SessionAdapter>,
    auth: AuthService,
    profile: ProfileService,
    dashboard: DashboardService,
    admin: AdminService,
}

impl App {
    /// Build every layer from configuration
    ///
    /// # Errors
    ///
    /// Fails for invalid configuration or an unreadable session file.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;

        let store: Arc<dyn SessionStore> = if config.session.ephemeral {
            Arc::new(InMemorySessionStore::new())
        } else {
            Arc::new(FileSessionStore::open(&config.session.path).with_context(|| {
                format!("opening session file {}", config.session.path.display())
            })?)
        };
        debug!(?store, "Session store ready");

        let portal = Arc::new(PortalAdapter::from_config(config.portal.clone(), store.clone())?);
        let session = Arc::new(SessionAdapter::new(store));

        Ok(Self {
            auth: AuthService::new(portal.clone(), session.clone()),
            profile: ProfileService::new(portal.clone()),
            dashboard: DashboardService::new(portal.clone()),
            admin: AdminService::new(portal.clone()),
            portal,
            session,
        })
    }

    /// Run one command and render what the user should see
    ///
    /// # Errors
    ///
    /// Only for malformed command arguments; backend failures are reported
    /// through [`Report::failed`].
    pub async fn run(&self, command: Commands) -> anyhow::Result<Report> {
        let events = self.portal.client().subscribe();
        let mut report = self.dispatch(command).await?;
        report.output.push_str(&drain_session_events(events));
        Ok(report)
    }

    async fn dispatch(&self, command: Commands) -> anyhow::Result<Report> {
        let report = match command {
            Commands::Signup(args) => {
                let outcome = self.auth.sign_up(args.into_form()).await;
                Report::from_outcome(&outcome, None)
            },
            Commands::VerifyOtp { code } => {
                let outcome = self.auth.verify_otp(&code).await;
                Report::from_outcome(&outcome, None)
            },
            Commands::Signin { email, password } => {
                let outcome = self.auth.sign_in(SignInForm::new(email, password)).await;
                Report::from_outcome(&outcome, None)
            },
            Commands::Logout => Report::from_outcome(&self.auth.logout(), None),
            Commands::CompleteProfile(args) => {
                let outcome = self
                    .guarded(Route::ProfileUpdate, self.profile.complete_profile(args.into_form()))
                    .await;
                Report::from_outcome(&outcome, None)
            },
            Commands::Profile => {
                let outcome = self
                    .guarded(Route::Profile, self.profile.my_profile())
                    .await;
                Report::from_outcome(&outcome, outcome.value.as_ref().map(render::account))
            },
            Commands::Dashboard => {
                let outcome = self
                    .guarded(Route::Dashboard, self.dashboard.load())
                    .await;
                Report::from_outcome(&outcome, outcome.value.as_ref().map(render::dashboard))
            },
            Commands::Register { event_id } => {
                let event_id = EventId::new(event_id).context("invalid event id")?;
                let outcome = self
                    .guarded(Route::Dashboard, self.dashboard.register(&event_id))
                    .await;
                Report::from_outcome(&outcome, None)
            },
            Commands::AddSong {
                details,
                topic,
                karaoke,
            } => {
                let form = SongForm {
                    song_details: details,
                    topic,
                    need_karaoke: karaoke,
                };
                let outcome = self
                    .guarded(Route::Dashboard, self.dashboard.add_song(form))
                    .await;
                Report::from_outcome(&outcome, None)
            },
            Commands::Admin => {
                let outcome = self.guarded(Route::Admin, self.admin.load()).await;
                Report::from_outcome(&outcome, outcome.value.as_ref().map(render::admin))
            },
            Commands::Route { path } => {
                let landed = self.auth.guard(path);
                Report::plain(format!("{path} → {landed}\n"))
            },
            Commands::Countdown { target } => {
                Report::plain(render::countdown(&Countdown::until(target, Utc::now())))
            },
        };
        Ok(report)
    }

    /// Run `action` only if the route guard lets the user onto `page`
    async fn guarded<T, F>(&self, page: Route, action: F) -> Outcome<T>
    where
        F: Future<Output = Outcome<T>>,
    {
        let landed = self.auth.guard(page);
        if landed == page {
            action.await
        } else {
            info!(requested = %page, landed = %landed, "Not signed in");
            Outcome::error("Please sign in first.").navigate(landed)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

fn drain_session_events(mut events: Receiver<SessionEvent>) -> String {
    let mut out = String::new();
    while let Ok(event) = events.try_recv() {
        out.push_str(&render::session_event(&event));
    }
    out
}

//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config.toml` (or an explicit file), then `ALUMNI_`-prefixed environment
//! variables. Nested keys use a double underscore, e.g.
//! `ALUMNI_PORTAL__BASE_URL`.

use std::path::{Path, PathBuf};

use integration_portal::PortalConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

const ENV_PREFIX: &str = "ALUMNI";

/// Where the client session is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding the access token and pending email
    #[serde(default = "default_session_path")]
    pub path: PathBuf,

    /// Keep the session in memory only; nothing survives the process
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".alumni").join("session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            ephemeral: false,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub portal: PortalConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from `./config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load from `path` (required when given) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is missing or any source is malformed.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, environment())
    }

    fn build(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                config::File::from(path).required(true)
            },
            None => config::File::with_name("config").required(false),
        };

        config::Config::builder()
            .set_default("portal.base_url", PortalConfig::default().base_url)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Check every section
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.portal.validate()?;
        if !self.session.ephemeral && self.session.path.as_os_str().is_empty() {
            return Err("session.path must not be empty".to_string());
        }
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

//! Portal client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection and caching settings for [`crate::PortalClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Backend base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// How long a successful read stays cached
    #[serde(default = "default_query_ttl_secs")]
    pub query_ttl_secs: u64,

    /// Upper bound on cached read results
    #[serde(default = "default_max_cached_queries")]
    pub max_cached_queries: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_query_ttl_secs() -> u64 {
    300
}

const fn default_max_cached_queries() -> u64 {
    256
}

fn default_user_agent() -> String {
    format!("alumni-portal/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            query_ttl_secs: default_query_ttl_secs(),
            max_cached_queries: default_max_cached_queries(),
            user_agent: default_user_agent(),
        }
    }
}

impl PortalConfig {
    /// Configuration pointing at a local mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
            query_ttl_secs: 30,
            ..Self::default()
        }
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub const fn query_ttl(&self) -> Duration {
        Duration::from_secs(self.query_ttl_secs)
    }

    /// Join the base URL and an absolute path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be greater than 0".to_string());
        }
        if self.query_ttl_secs == 0 {
            return Err("query_ttl_secs must be greater than 0".to_string());
        }
        if self.max_cached_queries == 0 {
            return Err("max_cached_queries must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(config.user_agent.starts_with("alumni-portal/"));
    }

    #[test]
    fn url_for_strips_trailing_slash() {
        let config = PortalConfig::for_testing("http://api.test/");
        assert_eq!(config.url_for("/events"), "http://api.test/events");
    }

    #[test]
    fn invalid_settings_are_reported() {
        let mut config = PortalConfig::default();
        config.base_url = "ftp://x".to_string();
        assert!(config.validate().unwrap_err().contains("http"));

        let config = PortalConfig {
            timeout_secs: 0,
            ..PortalConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("timeout_secs"));

        let config = PortalConfig {
            query_ttl_secs: 0,
            ..PortalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: PortalConfig =
            serde_json::from_str(r#"{ "base_url": "https://portal.example" }"#).unwrap();
        assert_eq!(config.base_url, "https://portal.example");
        assert_eq!(config.query_ttl_secs, 300);
    }
}

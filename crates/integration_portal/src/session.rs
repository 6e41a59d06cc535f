//! Session storage seam and session lifecycle events
//!
//! The adapter never reaches for ambient storage; it is handed a
//! [`SessionStore`] at construction and reads the token from it at send time.

use std::collections::HashMap;
use std::fmt;

use domain::Route;
use parking_lot::Mutex;
use secrecy::SecretString;
use thiserror::Error;

/// Storage key of the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the email awaiting OTP verification
pub const PENDING_EMAIL_KEY: &str = "email";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionStoreError {
    /// Backing storage could not be read or written
    #[error("Session storage I/O failed: {0}")]
    Io(String),

    /// Backing storage exists but is not in the expected format
    #[error("Session storage is corrupt: {0}")]
    Corrupt(String),
}

/// Persistent client-side key-value storage
///
/// Writes are whole-value overwrites or removals, so implementations only
/// need per-call atomicity.
pub trait SessionStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    /// Remove a key; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be persisted.
    fn remove(&self, key: &str) -> Result<(), SessionStoreError>;

    /// The stored bearer token, if any
    fn access_token(&self) -> Option<SecretString> {
        self.get(ACCESS_TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }
}

/// Process-local [`SessionStore`]
#[derive(Default)]
pub struct InMemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an access token
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

impl fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.lock();
        let mut keys: Vec<&String> = values.keys().collect();
        keys.sort();
        f.debug_struct("InMemorySessionStore")
            .field("keys", &keys)
            .finish()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Broadcast to the hosting application when the session changes underneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the session; the token has been removed
    Expired {
        /// Where the host should navigate
        redirect_to: Route,
        /// Path of the request that was rejected
        rejected_path: String,
    },
}

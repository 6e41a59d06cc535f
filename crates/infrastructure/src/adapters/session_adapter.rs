//! Adapter: application `SessionPort` over an `integration_portal::SessionStore`

use std::fmt;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::SessionPort;
use domain::EmailAddress;
use integration_portal::{ACCESS_TOKEN_KEY, PENDING_EMAIL_KEY, SessionStore, SessionStoreError};
use secrecy::SecretString;
use tracing::warn;

/// Typed view of the shared session store
///
/// The same store is handed to the portal client, so a token cleared after a
/// 401 is gone here too.
pub struct SessionAdapter {
    store: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionAdapter")
            .field("store", &self.store)
            .finish()
    }
}

impl SessionAdapter {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

fn map_store_error(error: SessionStoreError) -> ApplicationError {
    ApplicationError::Storage(error.to_string())
}

impl SessionPort for SessionAdapter {
    fn access_token(&self) -> Option<SecretString> {
        self.store.access_token()
    }

    fn store_access_token(&self, token: &str) -> Result<(), ApplicationError> {
        self.store
            .set(ACCESS_TOKEN_KEY, token)
            .map_err(map_store_error)
    }

    fn clear_access_token(&self) -> Result<(), ApplicationError> {
        self.store.remove(ACCESS_TOKEN_KEY).map_err(map_store_error)
    }

    fn pending_email(&self) -> Option<EmailAddress> {
        let raw = self.store.get(PENDING_EMAIL_KEY)?;
        match EmailAddress::new(raw) {
            Ok(email) => Some(email),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed pending email");
                None
            },
        }
    }

    fn store_pending_email(&self, email: &EmailAddress) -> Result<(), ApplicationError> {
        self.store
            .set(PENDING_EMAIL_KEY, email.as_str())
            .map_err(map_store_error)
    }

    fn clear_pending_email(&self) -> Result<(), ApplicationError> {
        self.store.remove(PENDING_EMAIL_KEY).map_err(map_store_error)
    }

    fn is_authenticated(&self) -> bool {
        self.store.access_token().is_some()
    }
}

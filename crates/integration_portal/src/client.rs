//! The typed request adapter
//!
//! [`PortalClient`] is the single entry point for calls against the backend.
//! Reads go through a keyed cache that also collapses concurrent identical
//! loads; writes are sent as-is, once per trigger. Bearer tokens are read from
//! the injected [`SessionStore`] at send time, and any 401 clears the stored
//! token and broadcasts [`SessionEvent::Expired`].

use std::fmt;
use std::sync::Arc;

use domain::Route;
use moka::future::Cache;
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{Span, debug, field, info, instrument, warn};
use uuid::Uuid;

use crate::config::PortalConfig;
use crate::error::{ApiError, ErrorBody, ServerMessage};
use crate::query::{ApiCall, Mutation, QueryHandle};
use crate::request::RequestDescriptor;
use crate::session::{ACCESS_TOKEN_KEY, SessionEvent, SessionStore};

/// Header carrying a per-request correlation id
pub const X_REQUEST_ID: &str = "x-request-id";

const SESSION_EVENT_CAPACITY: usize = 16;

/// Cache identity of a read: caller key plus the full request shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    key: String,
    fingerprint: String,
}

impl QueryKey {
    fn new(key: &str, descriptor: &RequestDescriptor) -> Self {
        Self {
            key: key.to_string(),
            fingerprint: descriptor.fingerprint(),
        }
    }
}

struct Inner {
    http: Client,
    config: PortalConfig,
    session: Arc<dyn SessionStore>,
    queries: Cache<QueryKey, Arc<Value>>,
    events: broadcast::Sender<SessionEvent>,
}

/// Cheaply cloneable handle to the portal backend
#[derive(Clone)]
pub struct PortalClient {
    inner: Arc<Inner>,
}

impl fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalClient")
            .field("base_url", &self.inner.config.base_url)
            .field("cached_queries", &self.inner.queries.entry_count())
            .field("session", &self.inner.session)
            .finish()
    }
}

impl PortalClient {
    /// Build a client for `config`, reading credentials from `session`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for an invalid configuration or if
    /// the HTTP client cannot be initialized.
    pub fn new(config: PortalConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::Configuration)?;

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        let queries = Cache::builder()
            .max_capacity(config.max_cached_queries)
            .time_to_live(config.query_ttl())
            .build();

        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                session,
                queries,
                events,
            }),
        })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    /// Receive [`SessionEvent`]s emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Prepare a call the way a view would: reads start loading immediately,
    /// writes wait for [`Mutation::trigger`]
    ///
    /// Must be called from within a Tokio runtime when `descriptor` is a read.
    pub fn call<T>(&self, key: &str, descriptor: RequestDescriptor) -> ApiCall<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        if descriptor.verb().is_read() {
            ApiCall::Query(self.watch_query(key, descriptor))
        } else {
            ApiCall::Mutation(Mutation::new(self.clone(), descriptor))
        }
    }

    /// Start loading a read in the background; the load is aborted when the
    /// returned handle is dropped
    pub fn watch_query<T>(&self, key: &str, descriptor: RequestDescriptor) -> QueryHandle<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        QueryHandle::spawn(self.clone(), key.to_string(), descriptor)
    }

    /// A write trigger for `descriptor`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `descriptor` is a read.
    pub fn mutation<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<Mutation<T>, ApiError> {
        if descriptor.verb().is_read() {
            return Err(ApiError::InvalidRequest(format!(
                "{} {} is a read; use a query",
                descriptor.verb(),
                descriptor.path()
            )));
        }
        Ok(Mutation::new(self.clone(), descriptor))
    }

    /// Cached read
    ///
    /// Concurrent calls with the same key and descriptor share one request.
    /// Failures are returned to every waiter and are not cached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for non-read descriptors, otherwise
    /// whatever [`Self::execute`] returned.
    pub async fn query<T: DeserializeOwned>(
        &self,
        key: &str,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        if !descriptor.verb().is_read() {
            return Err(ApiError::InvalidRequest(format!(
                "{} {} cannot be cached",
                descriptor.verb(),
                descriptor.path()
            )));
        }

        let cache_key = QueryKey::new(key, descriptor);
        let value = self
            .inner
            .queries
            .try_get_with(cache_key, async {
                debug!(key, path = descriptor.path(), "Query cache miss");
                self.execute(descriptor).await.map(Arc::new)
            })
            .await
            .map_err(|e| (*e).clone())?;

        decode(value.as_ref())
    }

    /// Drop any cached result for `key`/`descriptor` and load it again
    ///
    /// # Errors
    ///
    /// See [`Self::query`].
    pub async fn refetch<T: DeserializeOwned>(
        &self,
        key: &str,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        self.invalidate(key, descriptor).await;
        self.query(key, descriptor).await
    }

    pub async fn invalidate(&self, key: &str, descriptor: &RequestDescriptor) {
        self.inner
            .queries
            .invalidate(&QueryKey::new(key, descriptor))
            .await;
    }

    /// Forget every cached read, e.g. after the user changes
    pub fn clear_cache(&self) {
        self.inner.queries.invalidate_all();
    }

    /// Send `descriptor` and decode the response into `T`
    ///
    /// # Errors
    ///
    /// See [`Self::execute`]; additionally [`ApiError::Decode`] if the body
    /// does not match `T`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        let value = self.execute(descriptor).await?;
        decode(&value)
    }

    /// Send one request, uncached
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`]/[`ApiError::Timeout`] when no response arrives
    /// - [`ApiError::Unauthorized`] on 401, after the session was cleared
    /// - [`ApiError::Status`] for any other non-success status
    /// - [`ApiError::Decode`] if a success body is not JSON
    #[instrument(
        skip(self, descriptor),
        fields(
            method = %descriptor.verb(),
            path = %descriptor.path(),
            auth = descriptor.requires_auth(),
            request_id = field::Empty,
        )
    )]
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", field::display(request_id));

        let url = self.inner.config.url_for(descriptor.path());
        let mut builder = self
            .inner
            .http
            .request(descriptor.verb().method(), &url)
            .header(X_REQUEST_ID, request_id.to_string());

        if !descriptor.query().is_empty() {
            builder = builder.query(descriptor.query());
        }

        if descriptor.requires_auth() {
            match self.inner.session.access_token() {
                Some(token) => builder = builder.bearer_auth(token.expose_secret()),
                None => debug!("No stored access token, sending without Authorization"),
            }
        }

        if let Some(body) = descriptor.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: self.inner.config.timeout_secs,
                }
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            let message = error_message(response).await;
            self.expire_session(descriptor.path());
            return Err(ApiError::Unauthorized { message });
        }

        if !status.is_success() {
            let message = error_message(response).await;
            warn!(%status, ?message, "Request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!(%status, bytes = bytes.len(), "Request succeeded");

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Clear the stored token and tell every subscriber
    fn expire_session(&self, rejected_path: &str) {
        if let Err(e) = self.inner.session.remove(ACCESS_TOKEN_KEY) {
            warn!(error = %e, "Failed to clear stored access token");
        }
        self.clear_cache();

        let event = SessionEvent::Expired {
            redirect_to: Route::SESSION_LOST,
            rejected_path: rejected_path.to_string(),
        };
        // No subscribers is fine: the token is gone either way
        let receivers = self.inner.events.send(event).unwrap_or(0);
        info!(path = rejected_path, receivers, "Session expired");
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    T::deserialize(value).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn error_message(response: Response) -> Option<ServerMessage> {
    let bytes = response.bytes().await.ok()?;
    serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .and_then(|b| b.message)
}

#[cfg(test)]
mod tests {
    use crate::session::InMemorySessionStore;

    use super::*;

    fn client() -> PortalClient {
        PortalClient::new(
            PortalConfig::for_testing("http://127.0.0.1:9"),
            Arc::new(InMemorySessionStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PortalConfig {
            base_url: String::new(),
            ..PortalConfig::default()
        };
        let err = PortalClient::new(config, Arc::new(InMemorySessionStore::new())).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn mutation_refuses_reads() {
        let err = client()
            .mutation::<Value>(RequestDescriptor::read("/events"))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn query_refuses_writes() {
        let err = client()
            .query::<Value>("k", &RequestDescriptor::create("/events"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn query_keys_include_request_shape() {
        let a = QueryKey::new("events", &RequestDescriptor::read("/events"));
        let b = QueryKey::new("events", &RequestDescriptor::read("/events").authenticated());
        let c = QueryKey::new("other", &RequestDescriptor::read("/events"));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let err = decode::<Vec<String>>(&serde_json::json!({ "a": 1 })).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}

//! Alumni portal request adapter
//!
//! Every backend call goes through [`PortalClient`]:
//!
//! - reads ([`Verb::Read`]) are cached per key and request shape, and
//!   concurrent identical reads share one request
//! - writes are sent once per [`Mutation::trigger`], never debounced
//! - authenticated descriptors get `Authorization: Bearer <token>` from the
//!   injected [`SessionStore`]
//! - a 401 from any call clears the stored token and broadcasts
//!   [`SessionEvent::Expired`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use integration_portal::{InMemorySessionStore, PortalClient, PortalConfig, RequestDescriptor};
//!
//! let client = PortalClient::new(PortalConfig::default(), Arc::new(InMemorySessionStore::new()))?;
//! let events: serde_json::Value = client
//!     .query("events", &RequestDescriptor::read("/events").authenticated())
//!     .await?;
//! ```

mod client;
mod config;
pub mod endpoints;
mod error;
mod query;
mod request;
mod session;

pub use client::{PortalClient, X_REQUEST_ID};
pub use config::PortalConfig;
pub use error::{ApiError, ServerMessage};
pub use query::{ApiCall, Mutation, QueryHandle, QueryState};
pub use request::{RequestDescriptor, Verb};
pub use session::{
    ACCESS_TOKEN_KEY, InMemorySessionStore, PENDING_EMAIL_KEY, SessionEvent, SessionStore,
    SessionStoreError,
};

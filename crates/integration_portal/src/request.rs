//! Request descriptors: what to call, how, and with which credentials

use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// The fixed set of operations the backend exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `GET`; cached and deduplicated
    Read,
    /// `POST`
    Create,
    /// `PUT`
    Replace,
    /// `PATCH`
    Update,
    /// `DELETE`
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Self::Read => Method::GET,
            Self::Create => Method::POST,
            Self::Replace => Method::PUT,
            Self::Update => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }

    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// One HTTP call against the backend
///
/// ```
/// use integration_portal::{RequestDescriptor, Verb};
///
/// let request = RequestDescriptor::read("/events").authenticated();
/// assert_eq!(request.verb(), Verb::Read);
/// assert!(request.requires_auth());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    verb: Verb,
    path: String,
    requires_auth: bool,
    body: Option<Value>,
    query: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            verb,
            path,
            requires_auth: false,
            body: None,
            query: Vec::new(),
        }
    }

    pub fn read(path: impl Into<String>) -> Self {
        Self::new(Verb::Read, path)
    }

    pub fn create(path: impl Into<String>) -> Self {
        Self::new(Verb::Create, path)
    }

    pub fn replace(path: impl Into<String>) -> Self {
        Self::new(Verb::Replace, path)
    }

    pub fn update(path: impl Into<String>) -> Self {
        Self::new(Verb::Update, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    /// Attach the stored bearer token when sending
    #[must_use]
    pub const fn authenticated(self) -> Self {
        self.with_auth(true)
    }

    #[must_use]
    pub const fn with_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Serialize `body` as the static JSON payload
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `body` cannot be serialized.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
        );
        Ok(self)
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub const fn verb(&self) -> Verb {
        self.verb
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Everything that distinguishes two reads of the same cache key
    pub(crate) fn fingerprint(&self) -> String {
        let mut out = format!("{} {}", self.verb, self.path);
        for (k, v) in &self.query {
            out.push_str(&format!("&{k}={v}"));
        }
        if self.requires_auth {
            out.push_str(" +auth");
        }
        if let Some(body) = &self.body {
            out.push(' ');
            out.push_str(&body.to_string());
        }
        out
    }
}

//! Request adapter error types

use serde::Deserialize;
use thiserror::Error;

/// Message field of a backend error body: a single string or a list of
/// field-level validation messages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Single(String),
    Many(Vec<String>),
}

impl ServerMessage {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::Single(m) => vec![m.clone()],
            Self::Many(list) => list.clone(),
        }
    }

    /// The message when it is a single string
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(m) => Some(m),
            Self::Many(_) => None,
        }
    }
}

/// Error body as sent by the backend framework
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<ServerMessage>,
}

/// Errors returned by [`crate::PortalClient`]
///
/// Variants without a status code mean no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server could not be reached
    #[error("Connection failed: {0}")]
    Network(String),

    /// No response within the configured timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// HTTP 401; the stored session has already been cleared
    #[error("Session rejected by server")]
    Unauthorized {
        /// Message from the error body, if any
        message: Option<ServerMessage>,
    },

    /// Any other non-success status
    #[error("Request failed with HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the error body, if any
        message: Option<ServerMessage>,
    },

    /// A success response whose body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The call was not sent because it was malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The client could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The owning query handle was cancelled before the call settled
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// HTTP status, when a response was received
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when no response was received at all
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout { .. })
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub const fn server_message(&self) -> Option<&ServerMessage> {
        match self {
            Self::Unauthorized { message } | Self::Status { message, .. } => message.as_ref(),
            _ => None,
        }
    }

    /// Server-provided messages, flattened
    pub fn messages(&self) -> Vec<String> {
        self.server_message().map(ServerMessage::to_vec).unwrap_or_default()
    }
}

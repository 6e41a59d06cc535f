//! Application-level errors

use std::fmt;

use domain::DomainError;
use thiserror::Error;

/// What the server said when it turned a request down
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Rejection {
    /// No usable message in the body
    #[default]
    Unspecified,
    /// A single message string
    Message(String),
    /// Field-level validation messages
    FieldErrors(Vec<String>),
}

impl Rejection {
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Unspecified => Vec::new(),
            Self::Message(m) => vec![m.clone()],
            Self::FieldErrors(list) => list.clone(),
        }
    }

    /// The single message, if that is what the server sent
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Whether the server sent exactly `text` as its message
    pub fn is(&self, text: &str) -> bool {
        self.message() == Some(text)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => f.write_str("no reason given"),
            Self::Message(m) => f.write_str(m),
            Self::FieldErrors(list) => f.write_str(&list.join("; ")),
        }
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Input rejected before anything was sent
    #[error("Invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// No response from the backend
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a 4xx other than 401
    #[error("Request rejected ({status}): {reason}")]
    Rejected { status: u16, reason: Rejection },

    /// The backend answered 401; the session has been cleared
    #[error("Session expired: {reason}")]
    SessionExpired { reason: Rejection },

    /// The backend answered with a 5xx
    #[error("Server error ({status}): {reason}")]
    ServerFault { status: u16, reason: Rejection },

    /// Local session storage failed
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApplicationError {
    fn from(error: DomainError) -> Self {
        Self::Validation(error.messages())
    }
}

impl ApplicationError {
    /// HTTP status of a server answer
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::ServerFault { status, .. } => Some(*status),
            Self::SessionExpired { .. } => Some(401),
            _ => None,
        }
    }

    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected { reason, .. }
            | Self::ServerFault { reason, .. }
            | Self::SessionExpired { reason } => Some(reason),
            _ => None,
        }
    }

    /// First message the server sent, if any
    pub fn server_message(&self) -> Option<String> {
        self.rejection().and_then(|r| r.messages().into_iter().next())
    }

    /// A 401 whose body carried no message
    pub const fn session_expired() -> Self {
        Self::SessionExpired {
            reason: Rejection::Unspecified,
        }
    }

    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_become_validation_messages() {
        let err: ApplicationError =
            DomainError::Validation(vec!["a".to_string(), "b".to_string()]).into();
        assert_eq!(
            err,
            ApplicationError::Validation(vec!["a".to_string(), "b".to_string()])
        );

        let err: ApplicationError = DomainError::InvalidOtp("12".to_string()).into();
        assert!(matches!(err, ApplicationError::Validation(m) if m.len() == 1));
    }

    #[test]
    fn rejection_matching() {
        let single = Rejection::Message("User already exists".to_string());
        assert!(single.is("User already exists"));
        assert!(!Rejection::FieldErrors(vec!["User already exists".to_string()])
            .is("User already exists"));
        assert!(Rejection::Unspecified.messages().is_empty());
    }

    #[test]
    fn status_and_server_message() {
        let err = ApplicationError::Rejected {
            status: 409,
            reason: Rejection::FieldErrors(vec!["first".to_string(), "second".to_string()]),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.server_message().as_deref(), Some("first"));
        assert_eq!(ApplicationError::session_expired().status(), Some(401));
        assert!(ApplicationError::Unreachable("refused".to_string()).is_unreachable());
    }

    #[test]
    fn session_expiry_keeps_the_server_message() {
        let err = ApplicationError::SessionExpired {
            reason: Rejection::Message("Invalid credentials".to_string()),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.server_message().as_deref(), Some("Invalid credentials"));
        assert_eq!(ApplicationError::session_expired().server_message(), None);
    }

    #[test]
    fn display_lists_validation_messages() {
        let err = ApplicationError::Validation(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(err.to_string(), "Invalid input: x; y");
    }
}

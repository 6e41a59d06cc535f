//! Result of a use case as the user sees it

use domain::{Notice, Route};

use crate::error::{ApplicationError, Rejection};

pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const INVALID_REQUEST: &str = "Invalid request. Please check your input.";
pub const SERVER_ERROR: &str = "Server error! Please try again later.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Notices to show, where to go next and, for loads, the loaded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T = ()> {
    pub notices: Vec<Notice>,
    pub navigate_to: Option<Route>,
    pub value: Option<T>,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            navigate_to: None,
            value: None,
        }
    }
}

impl<T> Outcome<T> {
    pub fn notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            ..Self::default()
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::notice(Notice::success(text))
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::notice(Notice::error(text))
    }

    /// One error notice per message
    pub fn errors<I>(messages: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            notices: messages.into_iter().map(Notice::error).collect(),
            ..Self::default()
        }
    }

    pub fn loaded(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn navigate(mut self, route: Route) -> Self {
        self.navigate_to = Some(route);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(Notice::is_error)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.text.as_str()).collect()
    }
}

/// Error notices for the sign-up and sign-in forms
///
/// `known` maps exact single server messages on a 400 to friendlier text.
pub(crate) fn form_failure<T>(error: &ApplicationError, known: &[(&str, &str)]) -> Outcome<T> {
    match error {
        ApplicationError::Validation(messages) => Outcome::errors(messages.clone()),
        ApplicationError::Unreachable(_) => Outcome::error(NETWORK_ERROR),
        ApplicationError::Rejected { status: 400, reason } => match reason {
            Rejection::FieldErrors(messages) => Outcome::errors(messages.clone()),
            Rejection::Message(message) => known
                .iter()
                .find(|(server, _)| *server == message.as_str())
                .map_or_else(|| Outcome::error(INVALID_REQUEST), |(_, text)| Outcome::error(*text)),
            Rejection::Unspecified => Outcome::error(INVALID_REQUEST),
        },
        ApplicationError::ServerFault { status: 500, .. } => Outcome::error(SERVER_ERROR),
        other => Outcome::error(
            other
                .server_message()
                .unwrap_or_else(|| SOMETHING_WENT_WRONG.to_string()),
        ),
    }
}

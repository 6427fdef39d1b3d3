//! Feedback - What the View Should Show for a Request State
//!
//! The mapping from a state to message text is left to the view (it is a
//! localization concern); this module only decides the kind of feedback.

use crate::state::request_state::RequestState;

/// Severity level for UI notifications
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationSeverity {
    /// Informational message (auto-dismiss)
    Info,
    /// Error message (persist until dismissed)
    Error,
}

/// Feedback the view renders for the current request state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Nothing requested yet
    None,
    /// Show a spinner
    Spinner,
    /// Render the result set
    Content,
    /// Render the "no results" message
    EmptyState,
    /// Render a generic failure with a retry button
    RetryAffordance,
}

impl Feedback {
    /// Toast severity that should accompany this feedback, if any
    pub fn toast(&self) -> Option<NotificationSeverity> {
        match self {
            Feedback::RetryAffordance => Some(NotificationSeverity::Error),
            _ => None,
        }
    }
}

impl From<RequestState> for Feedback {
    fn from(state: RequestState) -> Self {
        match state {
            RequestState::Init => Feedback::None,
            RequestState::Loading => Feedback::Spinner,
            RequestState::Loaded => Feedback::Content,
            RequestState::NotFoundError => Feedback::EmptyState,
            RequestState::GeneralError => Feedback::RetryAffordance,
        }
    }
}

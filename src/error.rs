use thiserror::Error;

/// Recoverable failures of session operations.
///
/// None of these are fatal: the UI shows the message next to the control
/// that caused it and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// User input failed a constraint (message is shown verbatim)
    #[error("{0}")]
    Validation(String),

    /// Create or rename collided with another session
    #[error("Session with this name exists: {0}")]
    DuplicateName(String),

    /// The requested session disappeared before the action ran
    #[error("Session \"{0}\" does not exist anymore")]
    StaleReference(String),
}

impl SessionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

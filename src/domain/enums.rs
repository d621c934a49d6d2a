/// Runtime status of the session timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Paused,
}

impl RunStatus {
    /// Convert status to a short display tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    SessionForm, // Creating or editing a session
    SessionList,
}

impl UiMode {
    /// Whether a modal is open (global shortcuts are suppressed)
    pub fn is_modal(&self) -> bool {
        !matches!(self, Self::Normal)
    }
}

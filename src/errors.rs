use thiserror::Error;

/// The single warning shown when a wizard step is incomplete.
pub const REQUIRED_FIELDS_WARNING: &str = "Please fill out all the required fields.";

#[derive(Error, Debug)]
pub enum DietError {
    #[error("{}", REQUIRED_FIELDS_WARNING)] Validation,
    #[error("a diet plan is already being generated")] Busy,
    #[error("generation request failed: {0}")] Transport(String),
    #[error("generation endpoint returned {status}: {body}")] Status { status: u16, body: String },
    #[error("unexpected response envelope: {0}")] Envelope(String),
    #[error("config error: {0}")] Config(String),
    #[error("profile error: {0}")] Profile(String),
}

impl DietError {
    /// True for the failures that end a submission without a chart.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            DietError::Transport(_) | DietError::Status { .. } | DietError::Envelope(_)
        )
    }
}

impl From<reqwest::Error> for DietError {
    fn from(e: reqwest::Error) -> Self {
        DietError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DietError>;

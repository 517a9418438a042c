//! Error types for the decision wheel

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum WheelError {
    /// Malformed user input (blank name, bad spin-number list, unknown template)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A spin was requested while the candidate set is empty
    #[error("No candidates to spin")]
    EmptyCandidateSet,

    /// `add` refused because duplicates are forbidden
    #[error("Duplicate candidate rejected: {0}")]
    DuplicateRejected(String),

    /// Imported configuration is not valid JSON or has the wrong shape
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Configuration version {0} is newer than supported")]
    FutureVersion(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WheelError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Is this an error caused by user input?
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidConfig(_) | Self::FutureVersion(_)
        )
    }
}

/// Result type alias
pub type WheelResult<T> = Result<T, WheelError>;

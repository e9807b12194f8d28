//! Error types for action dispatch

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DispatchError>;

/// A dispatched action did not succeed.
///
/// Network failures and application-level failures are deliberately folded
/// into one kind: the user sees the message either way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{message}")]
    RequestFailed { message: String },
}

impl DispatchError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        DispatchError::RequestFailed {
            message: message.into(),
        }
    }

    /// Text shown in the error modal.
    pub fn message(&self) -> &str {
        match self {
            DispatchError::RequestFailed { message } => message,
        }
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        DispatchError::request_failed(err.to_string())
    }
}

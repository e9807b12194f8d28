use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a single dispatched action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchState {
    Idle,
    AwaitingConfirmation,
    Requesting,
    /// Success message shown, page reload pending or done
    Reloading,
    ErrorShown,
    /// Confirmation declined; nothing was sent
    Cancelled,
}

impl DispatchState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DispatchState::Reloading | DispatchState::ErrorShown | DispatchState::Cancelled
        )
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: DispatchState) -> bool {
        use DispatchState::*;
        matches!(
            (self, next),
            (Idle, AwaitingConfirmation)
                | (Idle, Requesting)
                | (AwaitingConfirmation, Requesting)
                | (AwaitingConfirmation, Cancelled)
                | (Requesting, Reloading)
                | (Requesting, ErrorShown)
        )
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchState::Idle => write!(f, "Idle"),
            DispatchState::AwaitingConfirmation => write!(f, "AwaitingConfirmation"),
            DispatchState::Requesting => write!(f, "Requesting"),
            DispatchState::Reloading => write!(f, "Reloading"),
            DispatchState::ErrorShown => write!(f, "ErrorShown"),
            DispatchState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

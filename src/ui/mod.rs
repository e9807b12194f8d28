pub mod terminal;
#[cfg(test)]
pub mod testing;

pub use terminal::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two message dialogs an action can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalKind {
    Success,
    Error,
}

impl ModalKind {
    pub fn title(&self) -> &'static str {
        match self {
            ModalKind::Success => "OK",
            ModalKind::Error => "ERROR",
        }
    }
}

/// A message shown to the user. The body is displayed as plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modal {
    pub id: String,
    pub shown_at: DateTime<Utc>,
    pub kind: ModalKind,
    pub body: String,
}

impl Modal {
    pub fn new(kind: ModalKind, body: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            shown_at: Utc::now(),
            kind,
            body: body.into(),
        }
    }

    pub fn success(body: impl Into<String>) -> Self {
        Self::new(ModalKind::Success, body)
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self::new(ModalKind::Error, body)
    }
}

/// What the dispatcher needs from the surface the user is looking at.
#[async_trait]
pub trait Ui: Send + Sync {
    /// Ask the user to confirm; blocks until answered.
    fn confirm(&self, prompt: &str) -> bool;

    /// Close the contextual actions menu with the given element id.
    fn close_menu(&self, menu_id: &str);

    fn show_modal(&self, modal: &Modal);

    /// Reload the current page.
    async fn reload(&self);
}

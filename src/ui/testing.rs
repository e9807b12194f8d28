use async_trait::async_trait;
use std::sync::Mutex;

use super::{Modal, Ui};

/// Ui double that answers confirmations with a fixed value and records
/// everything it is asked to do.
pub struct RecordingUi {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
    pub closed_menus: Mutex<Vec<String>>,
    pub modals: Mutex<Vec<Modal>>,
    pub reloads: Mutex<Vec<tokio::time::Instant>>,
}

impl RecordingUi {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
            closed_menus: Mutex::new(Vec::new()),
            modals: Mutex::new(Vec::new()),
            reloads: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn closed_menus(&self) -> Vec<String> {
        self.closed_menus.lock().unwrap().clone()
    }

    pub fn modals(&self) -> Vec<Modal> {
        self.modals.lock().unwrap().clone()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.lock().unwrap().len()
    }

    pub fn reloaded_at(&self) -> Option<tokio::time::Instant> {
        self.reloads.lock().unwrap().first().copied()
    }
}

#[async_trait]
impl Ui for RecordingUi {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }

    fn close_menu(&self, menu_id: &str) {
        self.closed_menus.lock().unwrap().push(menu_id.to_string());
    }

    fn show_modal(&self, modal: &Modal) {
        self.modals.lock().unwrap().push(modal.clone());
    }

    async fn reload(&self) {
        self.reloads.lock().unwrap().push(tokio::time::Instant::now());
    }
}

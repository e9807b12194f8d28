use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info, warn};

use super::{Modal, ModalKind, Ui};
use crate::client::StrategyBackend;

/// Interactive terminal front end. Confirmations are read from stdin,
/// modals are printed, and a reload re-requests the strategy list page.
pub struct TerminalUi {
    backend: Arc<dyn StrategyBackend>,
    page_path: String,
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(backend: Arc<dyn StrategyBackend>, page_path: impl Into<String>) -> Self {
        Self {
            backend,
            page_path: page_path.into(),
            assume_yes: false,
        }
    }

    /// Answer every confirmation with yes.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}

/// `y`, `yes`, `是` and `確定` confirm; anything else, including EOF, declines.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "是" | "確定"
    )
}

/// Read one answer line; EOF and read errors decline.
pub fn read_confirmation(reader: &mut impl BufRead) -> bool {
    let mut answer = String::new();
    match reader.read_line(&mut answer) {
        Ok(0) => false,
        Ok(_) => parse_confirmation(&answer),
        Err(e) => {
            warn!("Failed to read confirmation: {}", e);
            false
        }
    }
}

/// Run a blocking closure without stalling the tokio worker it is called
/// from. `block_in_place` is unavailable on current-thread runtimes.
fn run_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

#[async_trait]
impl Ui for TerminalUi {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            info!("{} [assumed yes]", prompt);
            return true;
        }

        let mut stderr = io::stderr();
        let _ = write!(stderr, "{} [y/N] ", prompt);
        let _ = stderr.flush();

        run_blocking(|| read_confirmation(&mut io::stdin().lock()))
    }

    fn close_menu(&self, menu_id: &str) {
        debug!("Closing menu #{}", menu_id);
    }

    fn show_modal(&self, modal: &Modal) {
        debug!("Modal {} ({:?}) at {}", modal.id, modal.kind, modal.shown_at);
        match modal.kind {
            ModalKind::Success => println!("[{}] {}", modal.kind.title(), modal.body),
            ModalKind::Error => eprintln!("[{}] {}", modal.kind.title(), modal.body),
        }
    }

    async fn reload(&self) {
        match self.backend.fetch_page(&self.page_path).await {
            Ok(status) => info!("Reloaded {} (HTTP {})", self.page_path, status),
            Err(e) => warn!("Reload of {} failed: {}", self.page_path, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockStrategyBackend;
    use crate::error::DispatchError;

    #[test]
    fn test_parse_confirmation() {
        assert!(parse_confirmation("y\n"));
        assert!(parse_confirmation("  YES "));
        assert!(parse_confirmation("是"));
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("sure"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_confirmation_read_on_worker_thread() {
        assert!(run_blocking(|| read_confirmation(&mut io::Cursor::new("yes\n"))));
        assert!(!run_blocking(|| read_confirmation(&mut io::Cursor::new(""))));
    }

    #[tokio::test]
    async fn test_confirmation_read_on_current_thread() {
        assert!(run_blocking(|| read_confirmation(&mut io::Cursor::new("確定\n"))));
        assert!(!run_blocking(|| read_confirmation(&mut io::Cursor::new("n\n"))));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let ui = TerminalUi::new(Arc::new(MockStrategyBackend::new()), "/").assume_yes(true);
        assert!(ui.confirm("確定要刪除嗎?"));
    }

    #[tokio::test]
    async fn test_reload_fetches_page() {
        let mut backend = MockStrategyBackend::new();
        backend
            .expect_fetch_page()
            .withf(|path| path == "/")
            .times(1)
            .returning(|_| Ok(200));

        let ui = TerminalUi::new(Arc::new(backend), "/");
        ui.reload().await;
    }

    #[tokio::test]
    async fn test_reload_failure_is_swallowed() {
        let mut backend = MockStrategyBackend::new();
        backend
            .expect_fetch_page()
            .times(1)
            .returning(|_| Err(DispatchError::request_failed("redirected to /login?err=please_login")));

        let ui = TerminalUi::new(Arc::new(backend), "/");
        ui.reload().await;
    }
}

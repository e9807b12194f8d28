pub mod state;

pub use state::*;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::actions::ActionKind;
use crate::client::{ActionReply, StrategyBackend};
use crate::config::Locale;
use crate::error::Result;
use crate::types::StrategyId;
use crate::ui::{Modal, Ui};

/// Time the success message stays up before the page reloads.
pub const RELOAD_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Confirmation was declined; no request was made
    Cancelled,
    /// The backend accepted the action and the page was reloaded
    Succeeded { reply: ActionReply },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub action: ActionKind,
    pub strategy: StrategyId,
    pub state: DispatchState,
}

/// Turns one user action into one backend request and one message.
///
/// Invocations are independent: nothing stops two dispatches for the same
/// strategy from being in flight at once.
pub struct ActionDispatcher {
    backend: Arc<dyn StrategyBackend>,
    ui: Arc<dyn Ui>,
    locale: Locale,
    state_tx: broadcast::Sender<StateChange>,
}

impl ActionDispatcher {
    pub fn new(backend: Arc<dyn StrategyBackend>, ui: Arc<dyn Ui>, locale: Locale) -> Self {
        let (state_tx, _) = broadcast::channel(32);
        Self {
            backend,
            ui,
            locale,
            state_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn advance(
        &self,
        action: ActionKind,
        strategy: &StrategyId,
        current: &mut DispatchState,
        next: DispatchState,
    ) {
        debug_assert!(current.can_transition_to(next), "{} -> {}", current, next);
        *current = next;
        let _ = self.state_tx.send(StateChange {
            action,
            strategy: strategy.clone(),
            state: next,
        });
    }

    pub async fn dispatch(&self, action: ActionKind, strategy: &StrategyId) -> Result<DispatchOutcome> {
        let descriptor = action.descriptor(self.locale);
        let mut state = DispatchState::Idle;

        if descriptor.requires_confirmation {
            self.advance(action, strategy, &mut state, DispatchState::AwaitingConfirmation);

            if !self.ui.confirm(descriptor.confirmation_prompt) {
                info!("{} of strategy {} cancelled", action, strategy);
                self.ui.close_menu(&strategy.menu_id());
                self.advance(action, strategy, &mut state, DispatchState::Cancelled);
                return Ok(DispatchOutcome::Cancelled);
            }
        }

        self.advance(action, strategy, &mut state, DispatchState::Requesting);
        let path = descriptor.path_for(strategy);
        info!("{} strategy {}: {} {}", action, strategy, descriptor.method, path);

        match self.backend.send(descriptor.method, &path).await {
            Ok(reply) => {
                if action == ActionKind::ClosePosition {
                    match reply.close_position_receipt() {
                        Some(receipt) => info!(
                            "Position of strategy {} closed at {} (fee {})",
                            strategy, receipt.price, receipt.fee
                        ),
                        None => debug!("No close-position receipt in reply: {}", reply.body),
                    }
                }

                self.ui.show_modal(&Modal::success(descriptor.success_message));
                self.advance(action, strategy, &mut state, DispatchState::Reloading);

                tokio::time::sleep(RELOAD_DELAY).await;
                self.ui.reload().await;

                Ok(DispatchOutcome::Succeeded { reply })
            }
            Err(err) => {
                warn!("{} strategy {} failed", action, strategy);
                self.ui.show_modal(&Modal::error(err.message()));
                self.advance(action, strategy, &mut state, DispatchState::ErrorShown);
                Err(err)
            }
        }
    }
}

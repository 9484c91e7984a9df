// Lifecycle controller and its event loop.
//
// The controller owns the only `UiState`. It validates submissions, spawns
// at most one analysis task at a time, and pushes every state change to the
// TUI. Analysis tasks report back over a dedicated channel.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use swingcoach_core::analysis::{AnalysisError, AnalysisResult};
use swingcoach_core::protocol::{UiState, UiUpdate, UserCommand};
use swingcoach_core::request::{self, FormFields};
use swingcoach_llm::client::AnalysisService;
use swingcoach_llm::prompt;

use crate::lifecycle::{transition, LifecycleEvent};

/// Result of one analysis task, sent back to the controller.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: Result<AnalysisResult, AnalysisError>,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct Controller {
    state: UiState,
    service: Arc<dyn AnalysisService>,
    /// Spawned tasks use a clone of this sender to report their outcome.
    outcome_tx: mpsc::Sender<AnalysisOutcome>,
    in_flight: Option<JoinHandle<()>>,
    /// Number of analysis calls dispatched since startup.
    dispatched: u64,
}

impl Controller {
    pub fn new(service: Arc<dyn AnalysisService>, outcome_tx: mpsc::Sender<AnalysisOutcome>) -> Self {
        Controller {
            state: UiState::Idle,
            service,
            outcome_tx,
            in_flight: None,
            dispatched: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Apply an event through the state machine. Returns `false` (and logs)
    /// when the event is not valid in the current state.
    fn apply(&mut self, event: LifecycleEvent) -> bool {
        let from = self.state.phase();
        match transition(&self.state, event) {
            Ok(next) => {
                info!("lifecycle: {} -> {}", from, next.phase());
                self.state = next;
                true
            }
            Err(e) => {
                warn!("lifecycle: {e}");
                false
            }
        }
    }

    async fn publish(&self, ui_tx: &mpsc::Sender<UiUpdate>) {
        let _ = ui_tx
            .send(UiUpdate::State(Box::new(self.state.clone())))
            .await;
    }

    /// Handle a form submission.
    ///
    /// Invalid input moves straight to `Error` without any network call.
    /// Valid input moves to `Loading` and dispatches exactly one analysis.
    /// Submissions while `Loading` are dropped.
    pub async fn handle_submit(&mut self, fields: FormFields, ui_tx: &mpsc::Sender<UiUpdate>) {
        if self.state.is_loading() {
            debug!("submit ignored: an analysis is already in flight");
            return;
        }

        match request::collect(&fields) {
            Err(e) => {
                info!("form rejected: {e}");
                if self.apply(LifecycleEvent::Rejected(e.user_message().to_string())) {
                    self.publish(ui_tx).await;
                }
            }
            Ok(req) => {
                if !self.apply(LifecycleEvent::Submitted) {
                    return;
                }
                self.publish(ui_tx).await;

                let spec = prompt::build(&req);
                debug!(user_message = %spec.user_message, "prompt built");
                self.dispatch(spec);
            }
        }
    }

    /// Spawn the single analysis task for the current cycle.
    fn dispatch(&mut self, spec: prompt::PromptSpec) {
        let service = Arc::clone(&self.service);
        let tx = self.outcome_tx.clone();
        self.dispatched += 1;
        info!(dispatched = self.dispatched, "dispatching analysis");

        self.in_flight = Some(tokio::spawn(async move {
            // A panic inside the service must still produce an outcome, or
            // the controller would sit in Loading forever.
            let result = match AssertUnwindSafe(service.analyze(&spec)).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(AnalysisError::ServiceFailure(format!(
                    "analysis task panicked: {}",
                    panic_message(payload.as_ref())
                ))),
            };
            let _ = tx.send(AnalysisOutcome { result }).await;
        }));
    }

    /// Handle the outcome of the in-flight analysis.
    pub async fn handle_outcome(&mut self, outcome: AnalysisOutcome, ui_tx: &mpsc::Sender<UiUpdate>) {
        self.in_flight = None;

        let event = match outcome.result {
            Ok(result) => {
                info!(level = %result.level, tips = result.tips.len(), "analysis complete");
                LifecycleEvent::Completed(result)
            }
            Err(e) => {
                error!("analysis failed: {e}");
                LifecycleEvent::Failed(e)
            }
        };

        if self.apply(event) {
            self.publish(ui_tx).await;
        }
    }

    /// Abort the in-flight task, if any. Only used on shutdown.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
            info!("aborted in-flight analysis on shutdown");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the controller event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. Analysis outcomes from spawned tasks
/// 2. User commands from the TUI
///
/// Pushes state changes through `ui_tx`. Returns on `Quit` or when the
/// command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut outcome_rx: mpsc::Receiver<AnalysisOutcome>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut controller: Controller,
) -> anyhow::Result<()> {
    info!("Lifecycle controller started");

    // When the outcome channel closes, stop polling it so select! never
    // spins on a closed receiver.
    let mut outcome_open = true;

    loop {
        tokio::select! {
            outcome = outcome_rx.recv(), if outcome_open => {
                match outcome {
                    Some(outcome) => controller.handle_outcome(outcome, &ui_tx).await,
                    None => {
                        info!("Outcome channel closed");
                        outcome_open = false;
                    }
                }
            }

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Submit(fields)) => {
                        controller.handle_submit(fields, &ui_tx).await;
                    }
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    controller.shutdown();
    info!("Lifecycle controller exiting");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

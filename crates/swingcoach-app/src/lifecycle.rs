// Request-lifecycle state machine.
//
//   Idle ──Submitted──▶ Loading ──Completed──▶ Success
//    │                     └──────Failed─────▶ Error
//    └──Rejected─────────────────────────────▶ Error
//
// Success and Error behave like Idle for the next submission. Nothing may
// start while Loading, and only Loading can finish.

use thiserror::Error;

use swingcoach_core::analysis::{AnalysisError, AnalysisResult};
use swingcoach_core::protocol::UiState;

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The form validated and a request is about to be dispatched.
    Submitted,
    /// The form failed validation; carries the user-facing message.
    Rejected(String),
    /// The analysis call returned a valid result.
    Completed(AnalysisResult),
    /// The analysis call failed.
    Failed(AnalysisError),
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Submitted => "submitted",
            LifecycleEvent::Rejected(_) => "rejected",
            LifecycleEvent::Completed(_) => "completed",
            LifecycleEvent::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("event `{event}` is not valid while {state}")]
    Illegal {
        state: &'static str,
        event: &'static str,
    },
}

/// Compute the state that follows `event`.
///
/// Analysis failures collapse to the generic user message; the cause is the
/// caller's to log.
pub fn transition(state: &UiState, event: LifecycleEvent) -> Result<UiState, TransitionError> {
    let illegal = |event: &LifecycleEvent| TransitionError::Illegal {
        state: state.phase(),
        event: event.name(),
    };

    match (state, event) {
        (UiState::Loading, event @ (LifecycleEvent::Submitted | LifecycleEvent::Rejected(_))) => {
            Err(illegal(&event))
        }
        (_, LifecycleEvent::Submitted) => Ok(UiState::Loading),
        (_, LifecycleEvent::Rejected(message)) => Ok(UiState::Error(message)),
        (UiState::Loading, LifecycleEvent::Completed(result)) => Ok(UiState::Success(result)),
        (UiState::Loading, LifecycleEvent::Failed(err)) => {
            Ok(UiState::Error(err.user_message().to_string()))
        }
        (_, event) => Err(illegal(&event)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

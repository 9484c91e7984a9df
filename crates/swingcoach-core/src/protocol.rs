// Message types exchanged between the lifecycle controller and the TUI.
//
// The controller owns the authoritative `UiState` and pushes every change
// to the TUI as a `UiUpdate`. The TUI sends `UserCommand`s back.

use crate::analysis::AnalysisResult;
use crate::request::FormFields;

/// What the interface currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    /// An analysis call is outstanding; submission is disabled.
    Loading,
    Success(AnalysisResult),
    /// User-facing error text.
    Error(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    /// Short name for logs and the status bar.
    pub fn phase(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "analyzing",
            UiState::Success(_) => "done",
            UiState::Error(_) => "error",
        }
    }
}

/// Commands sent from the TUI to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Submit the form as it currently reads.
    Submit(FormFields),
    Quit,
}

/// Updates pushed from the controller to the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// The controller entered a new state.
    State(Box<UiState>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(UiState::default(), UiState::Idle);
    }

    #[test]
    fn only_loading_is_loading() {
        assert!(UiState::Loading.is_loading());
        assert!(!UiState::Idle.is_loading());
        assert!(!UiState::Error("x".into()).is_loading());
        let result = AnalysisResult {
            level: "Beginner".into(),
            description: String::new(),
            tips: vec![],
        };
        assert!(!UiState::Success(result).is_loading());
    }

    #[test]
    fn phase_names() {
        assert_eq!(UiState::Idle.phase(), "idle");
        assert_eq!(UiState::Loading.phase(), "analyzing");
        assert_eq!(UiState::Error("x".into()).phase(), "error");
    }
}

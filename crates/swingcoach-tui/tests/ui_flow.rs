// Drives the whole pipeline without a terminal: key presses become
// commands, the controller runs against a scripted service, and every
// update is applied to a `ViewState`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tokio::sync::mpsc;

use swingcoach_app::{run, Controller};
use swingcoach_core::analysis::{AnalysisError, AnalysisResult, GENERIC_FAILURE_MESSAGE};
use swingcoach_core::protocol::{UiState, UiUpdate, UserCommand};
use swingcoach_core::request::VALIDATION_MESSAGE;
use swingcoach_llm::{AnalysisService, PromptSpec};
use swingcoach_tui::form::Field;
use swingcoach_tui::render::OutputBlock;
use swingcoach_tui::widgets::form::busy_indicator;
use swingcoach_tui::{apply_ui_update, input, ViewState};

// ===========================================================================
// Test helpers
// ===========================================================================

struct ScriptedService {
    replies: Mutex<VecDeque<Result<AnalysisResult, AnalysisError>>>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl AnalysisService for ScriptedService {
    async fn analyze(&self, spec: &PromptSpec) -> Result<AnalysisResult, AnalysisError> {
        self.prompts.lock().unwrap().push(spec.user_message.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnalysisError::ServiceFailure("script exhausted".into())))
    }
}

struct Session {
    view: ViewState,
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    service: Arc<ScriptedService>,
}

impl Session {
    fn start(replies: Vec<Result<AnalysisResult, AnalysisError>>) -> Self {
        let service = Arc::new(ScriptedService {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        });
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(64);
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        let controller = Controller::new(service.clone(), outcome_tx);
        tokio::spawn(run(cmd_rx, outcome_rx, ui_tx, controller));
        Session {
            view: ViewState::new("test-model".into(), 5),
            cmd_tx,
            ui_rx,
            service,
        }
    }

    /// Press a key and forward any resulting command.
    async fn press(&mut self, code: KeyCode) {
        let event = KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        if let Some(cmd) = input::handle_key(event, &mut self.view) {
            self.cmd_tx.send(cmd).await.unwrap();
        }
    }

    async fn type_into(&mut self, field: Field, text: &str) {
        self.view.form.focus = field;
        for c in text.chars() {
            self.press(KeyCode::Char(c)).await;
        }
    }

    /// Receive one update, apply it, and return the new state.
    async fn settle_one(&mut self) -> UiState {
        let update = self.ui_rx.recv().await.expect("controller stopped");
        apply_ui_update(&mut self.view, update);
        self.view.ui_state.clone()
    }
}

fn result(level: &str, tips: &[&str]) -> AnalysisResult {
    AnalysisResult {
        level: level.into(),
        description: "Great start!".into(),
        tips: tips.iter().map(|t| t.to_string()).collect(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn submit_shows_spinner_then_result_card() {
    let mut s = Session::start(vec![Ok(result("Beginner", &["Tip A", "Tip B"]))]);
    s.type_into(Field::Score, "105").await;
    s.type_into(Field::Age, "30").await;
    s.press(KeyCode::Enter).await;

    assert_eq!(s.settle_one().await, UiState::Loading);
    assert!(busy_indicator(&s.view).is_some());
    assert!(s.view.output.is_empty());

    assert!(matches!(s.settle_one().await, UiState::Success(_)));
    assert!(busy_indicator(&s.view).is_none());
    assert_eq!(
        s.view.output.block(),
        Some(&OutputBlock::Result {
            title: "Beginner".into(),
            body: "Great start!".into(),
            tips: Some(vec!["Tip A".into(), "Tip B".into()]),
        })
    );

    let prompts = s.service.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("My average 18-hole score is 105"));
    assert!(prompts[0].contains("I started playing at age 30"));
}

#[tokio::test]
async fn invalid_age_shows_validation_message_without_spinner() {
    let mut s = Session::start(vec![]);
    s.type_into(Field::Score, "90").await;
    s.type_into(Field::Age, "abc").await;
    s.press(KeyCode::Enter).await;

    assert_eq!(
        s.settle_one().await,
        UiState::Error(VALIDATION_MESSAGE.into())
    );
    assert!(busy_indicator(&s.view).is_none());
    assert_eq!(
        s.view.output.block(),
        Some(&OutputBlock::Error {
            message: VALIDATION_MESSAGE.into()
        })
    );
    assert!(s.service.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failure_replaces_previous_result() {
    let mut s = Session::start(vec![
        Ok(result("Professional", &["Keep it up"])),
        Err(AnalysisError::ServiceFailure("connection reset".into())),
    ]);
    s.type_into(Field::Score, "72").await;
    s.type_into(Field::Age, "8").await;

    s.press(KeyCode::Enter).await;
    s.settle_one().await;
    s.settle_one().await;
    assert!(!s.view.output.block().unwrap().is_error());

    s.press(KeyCode::Enter).await;
    assert_eq!(s.settle_one().await, UiState::Loading);
    assert!(s.view.output.is_empty());
    assert_eq!(
        s.settle_one().await,
        UiState::Error(GENERIC_FAILURE_MESSAGE.into())
    );
    assert_eq!(
        s.view.output.block(),
        Some(&OutputBlock::Error {
            message: GENERIC_FAILURE_MESSAGE.into()
        })
    );
}

#[tokio::test]
async fn enter_while_loading_sends_nothing() {
    let mut s = Session::start(vec![Ok(result("Beginner", &[]))]);
    s.type_into(Field::Score, "110").await;
    s.type_into(Field::Age, "45").await;

    s.press(KeyCode::Enter).await;
    assert_eq!(s.settle_one().await, UiState::Loading);
    s.press(KeyCode::Enter).await;
    s.press(KeyCode::Enter).await;

    assert!(matches!(s.settle_one().await, UiState::Success(_)));
    assert_eq!(s.service.prompts.lock().unwrap().len(), 1);
    assert!(matches!(
        s.view.output.block(),
        Some(OutputBlock::Result { tips: None, .. })
    ));
}

#[tokio::test]
async fn selectors_flow_into_prompt() {
    let mut s = Session::start(vec![Ok(result("Mid-Handicapper", &["Tip"]))]);
    s.type_into(Field::Score, "95").await;
    s.type_into(Field::Age, "20").await;

    s.view.form.focus = Field::Familiarity;
    s.press(KeyCode::Right).await;
    s.press(KeyCode::Right).await;
    s.view.form.focus = Field::WorstClub;
    s.press(KeyCode::Left).await;

    s.press(KeyCode::Enter).await;
    s.settle_one().await;
    s.settle_one().await;

    let prompts = s.service.prompts.lock().unwrap();
    assert!(prompts[0].contains("my familiarity with golf is a 7 out of 10"));
    assert!(prompts[0].contains("my worst club is Wedges"));
    assert!(prompts[0].contains("My best club is Driver"));
}

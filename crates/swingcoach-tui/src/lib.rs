// Terminal front end: form, output panel, and the render loop.
//
// The TUI owns a `ViewState`. The controller pushes `UiUpdate` messages over
// an mpsc channel; the TUI applies them to `ViewState` and re-renders at
// ~30 fps. Key presses edit the form locally and become `UserCommand`s
// when the user submits or quits.

pub mod form;
pub mod input;
pub mod layout;
pub mod render;
pub mod widgets;

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use swingcoach_core::protocol::{UiState, UiUpdate, UserCommand};
use swingcoach_core::request::FormFields;

use form::FormState;
use layout::{build_layout, AppLayout};
use render::OutputRegion;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Everything the TUI needs to draw a frame.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub form: FormState,
    /// Mirror of the controller's lifecycle state.
    pub ui_state: UiState,
    pub output: OutputRegion,
    /// Model name shown in the status bar.
    pub model: String,
    /// When the last successful analysis arrived.
    pub last_analysis_at: Option<DateTime<Local>>,
    pub spinner_frame: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(String::new(), FormFields::default().familiarity)
    }
}

impl ViewState {
    pub fn new(model: String, default_familiarity: u8) -> Self {
        ViewState {
            form: FormState::new(default_familiarity),
            ui_state: UiState::Idle,
            output: OutputRegion::default(),
            model,
            last_analysis_at: None,
            spinner_frame: 0,
        }
    }

    /// True while an analysis is in flight.
    pub fn is_busy(&self) -> bool {
        self.ui_state.is_loading()
    }
}

/// Apply a controller update to the view.
///
/// Loading empties the output region; Success and Error replace it.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::State(next) => {
            match next.as_ref() {
                UiState::Idle => {}
                UiState::Loading => {
                    state.output.clear();
                    state.spinner_frame = 0;
                }
                UiState::Success(result) => {
                    state.output.render_success(result);
                    state.last_analysis_at = Some(Local::now());
                }
                UiState::Error(message) => state.output.render_error(message),
            }
            state.ui_state = *next;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::form::render(frame, layout.form, state);
    widgets::output::render(frame, layout.output, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " Tab/↑↓:Move | ←→:Change | Enter:Analyze | q:Quit";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the controller closes
/// the update channel.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut spinner_tick = tokio::time::interval(Duration::from_millis(100));
    spinner_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() || quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input failed")),
                    None => break Ok(()),
                }
            }

            _ = spinner_tick.tick() => {
                if view_state.is_busy() {
                    view_state.spinner_frame = view_state.spinner_frame.wrapping_add(1);
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Status bar widget: lifecycle phase, model, time of the last analysis.

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use swingcoach_core::protocol::UiState;

use crate::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [app name] [phase dot + label] | model | last analysis
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (dot_color, phase) = phase_indicator(&state.ui_state);
    let spans = vec![
        Span::styled(
            " Swing Coach ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::styled(phase, Style::default().fg(Color::White)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("model: {}", state.model),
            Style::default().fg(Color::White),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            last_analysis_label(state.last_analysis_at),
            Style::default().fg(Color::White),
        ),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Dot color and phase label for the current lifecycle state.
pub fn phase_indicator(state: &UiState) -> (Color, &'static str) {
    let color = match state {
        UiState::Idle => Color::DarkGray,
        UiState::Loading => Color::Yellow,
        UiState::Success(_) => Color::Green,
        UiState::Error(_) => Color::Red,
    };
    (color, state.phase())
}

pub fn last_analysis_label(at: Option<DateTime<Local>>) -> String {
    match at {
        Some(at) => format!("last analysis {}", at.format("%H:%M:%S")),
        None => "no analysis yet".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

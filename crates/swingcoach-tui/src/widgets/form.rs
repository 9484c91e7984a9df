// Form widget: the six inputs and the submit button.
//
// Layout, one row per field:
//   ▸ Average 18-hole score    94_
//     Rounds per month         1-2 times
//     Familiarity with golf    [■■■■■□□□□□] 5/10
//   ...
//     [ Analyze My Game ]

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use swingcoach_core::request::{FormFields, FAMILIARITY_MAX};

use crate::form::Field;
use crate::ViewState;

/// Braille spinner shown on the submit button while an analysis runs.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const SUBMIT_LABEL: &str = "Analyze My Game";
const LABEL_WIDTH: usize = 25;

/// Render the form panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let busy = state.is_busy();
    let mut lines = Vec::with_capacity(Field::ALL.len() + 1);

    for field in Field::ALL {
        let focused = state.form.focus == field;
        if field == Field::Submit {
            lines.push(Line::from(""));
            lines.push(submit_line(state, focused));
            continue;
        }

        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
            Span::styled(
                field_value(field, &state.form.fields, focused),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    let border = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Your Game")
            .border_style(border),
    );
    frame.render_widget(paragraph, area);
}

/// Display text for one field's current value.
pub fn field_value(field: Field, fields: &FormFields, focused: bool) -> String {
    let selector = |label: &str| {
        if focused {
            format!("‹ {} ›", label)
        } else {
            label.to_string()
        }
    };
    let text = |value: &str| {
        if focused {
            format!("{}_", value)
        } else {
            value.to_string()
        }
    };

    match field {
        Field::Score => text(&fields.score),
        Field::Age => text(&fields.age),
        Field::Frequency => selector(fields.frequency.label()),
        Field::Familiarity => familiarity_bar(fields.familiarity),
        Field::BestClub => selector(fields.best_club.label()),
        Field::WorstClub => selector(fields.worst_club.label()),
        Field::Submit => String::new(),
    }
}

/// Slider rendering, e.g. `[■■■■■■■□□□] 7/10`.
pub fn familiarity_bar(value: u8) -> String {
    let filled = value.min(FAMILIARITY_MAX) as usize;
    let empty = FAMILIARITY_MAX as usize - filled;
    format!(
        "[{}{}] {}/{}",
        "■".repeat(filled),
        "□".repeat(empty),
        value,
        FAMILIARITY_MAX
    )
}

/// Spinner text shown while an analysis is in flight, `None` otherwise.
pub fn busy_indicator(state: &ViewState) -> Option<String> {
    if !state.is_busy() {
        return None;
    }
    let glyph = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
    Some(format!("{} Analyzing...", glyph))
}

fn submit_line(state: &ViewState, focused: bool) -> Line<'static> {
    match busy_indicator(state) {
        Some(spinner) => Line::from(Span::styled(
            format!("  [ {} ]", spinner),
            Style::default().fg(Color::Yellow),
        )),
        None => {
            let mut style = Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD);
            if focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("[ {} ]", SUBMIT_LABEL), style),
            ])
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use swingcoach_core::analysis::AnalysisResult;
    use swingcoach_core::protocol::UiState;

    use crate::widgets::buffer_text;

    fn draw(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(70, 14);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn familiarity_bar_shows_fraction() {
        assert_eq!(familiarity_bar(7), "[■■■■■■■□□□] 7/10");
        assert_eq!(familiarity_bar(1), "[■□□□□□□□□□] 1/10");
        assert_eq!(familiarity_bar(10), "[■■■■■■■■■■] 10/10");
    }

    #[test]
    fn focused_text_field_shows_cursor() {
        let fields = FormFields {
            score: "94".into(),
            ..FormFields::default()
        };
        assert_eq!(field_value(Field::Score, &fields, true), "94_");
        assert_eq!(field_value(Field::Score, &fields, false), "94");
    }

    #[test]
    fn focused_selector_shows_arrows() {
        let fields = FormFields::default();
        assert_eq!(field_value(Field::BestClub, &fields, true), "‹ Driver ›");
        assert_eq!(field_value(Field::WorstClub, &fields, false), "Putter");
    }

    #[test]
    fn busy_indicator_only_while_loading() {
        let mut state = ViewState::default();
        for settled in [
            UiState::Idle,
            UiState::Error("x".into()),
            UiState::Success(AnalysisResult {
                level: "Beginner".into(),
                description: "Great start!".into(),
                tips: vec![],
            }),
        ] {
            state.ui_state = settled;
            assert!(busy_indicator(&state).is_none());
        }
        state.ui_state = UiState::Loading;
        assert_eq!(busy_indicator(&state).as_deref(), Some("⠋ Analyzing..."));
        state.spinner_frame = 11;
        assert_eq!(busy_indicator(&state).as_deref(), Some("⠙ Analyzing..."));
    }

    #[test]
    fn render_shows_submit_button_when_idle() {
        let text = draw(&ViewState::default());
        assert!(text.contains("Analyze My Game"));
        assert!(text.contains("5/10"));
        assert!(!text.contains("Analyzing..."));
    }

    #[test]
    fn render_swaps_button_for_spinner_while_loading() {
        let mut state = ViewState::default();
        state.ui_state = UiState::Loading;
        let text = draw(&state);
        assert!(text.contains("Analyzing..."));
        assert!(!text.contains("Analyze My Game"));
    }

    #[test]
    fn render_does_not_panic_in_tiny_area() {
        let backend = ratatui::backend::TestBackend::new(10, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}

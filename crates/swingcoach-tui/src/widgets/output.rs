// Output widget: the result card, error card, or a placeholder.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use swingcoach_core::protocol::UiState;

use crate::render::OutputBlock;
use crate::ViewState;

/// Render the output panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (lines, border) = match state.output.block() {
        Some(block) => (block.lines(), border_style(block)),
        None => (
            vec![Line::from(placeholder_text(&state.ui_state))],
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Analysis")
                .title_style(Style::default().add_modifier(Modifier::BOLD))
                .border_style(border),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn border_style(block: &OutputBlock) -> Style {
    if block.is_error() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    }
}

/// Text shown while the region is empty.
pub fn placeholder_text(state: &UiState) -> &'static str {
    match state {
        UiState::Loading => "Reading your game...",
        _ => "Fill in the form and press Enter to get your analysis.",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use swingcoach_core::analysis::AnalysisResult;

    use crate::render::TIPS_HEADING;
    use crate::widgets::buffer_text;

    fn draw(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(80, 16);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn placeholder_text_values() {
        assert_eq!(placeholder_text(&UiState::Loading), "Reading your game...");
        assert_eq!(
            placeholder_text(&UiState::Idle),
            "Fill in the form and press Enter to get your analysis."
        );
    }

    #[test]
    fn render_empty_region_shows_placeholder() {
        let text = draw(&ViewState::default());
        assert!(text.contains("Fill in the form"));
    }

    #[test]
    fn render_result_card() {
        let mut state = ViewState::default();
        state.output.render_success(&AnalysisResult {
            level: "Beginner".into(),
            description: "Great start!".into(),
            tips: vec!["Tip A".into(), "Tip B".into()],
        });
        let text = draw(&state);
        assert!(text.contains("Beginner"));
        assert!(text.contains("Great start!"));
        assert!(text.contains(TIPS_HEADING));
        let a = text.find("Tip A").unwrap();
        let b = text.find("Tip B").unwrap();
        assert!(a < b);
    }

    #[test]
    fn render_error_card() {
        let mut state = ViewState::default();
        state.output.render_error("Sorry, try again.");
        let text = draw(&state);
        assert!(text.contains("Sorry, try again."));
        assert!(!text.contains("Fill in the form"));
    }

    #[test]
    fn render_does_not_panic_with_long_tips() {
        let backend = ratatui::backend::TestBackend::new(30, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.output.render_success(&AnalysisResult {
            level: "Mid-Handicapper".into(),
            description: "word ".repeat(80),
            tips: (0..20).map(|i| format!("Tip number {}", i)).collect(),
        });
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}

// Renderer: turns an analysis result or an error message into the single
// block shown in the output panel.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use swingcoach_core::analysis::AnalysisResult;

/// Heading printed above the tips list.
pub const TIPS_HEADING: &str = "Tips for Your Next Round:";

/// One rendered block of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBlock {
    /// A result card. `tips` is `None` when the model gave no tips.
    Result {
        title: String,
        body: String,
        tips: Option<Vec<String>>,
    },
    /// An error card holding the literal message.
    Error { message: String },
}

impl OutputBlock {
    pub fn is_error(&self) -> bool {
        matches!(self, OutputBlock::Error { .. })
    }

    /// Styled lines for the output panel.
    pub fn lines(&self) -> Vec<Line<'static>> {
        match self {
            OutputBlock::Result { title, body, tips } => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        title.clone(),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(body.clone()),
                ];
                if let Some(tips) = tips {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        TIPS_HEADING,
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                    for tip in tips {
                        lines.push(Line::from(vec![
                            Span::styled("  • ", Style::default().fg(Color::Green)),
                            Span::raw(tip.clone()),
                        ]));
                    }
                }
                lines
            }
            OutputBlock::Error { message } => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))],
        }
    }
}

/// The output panel's contents. Holds at most one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRegion {
    block: Option<OutputBlock>,
}

impl OutputRegion {
    pub fn block(&self) -> Option<&OutputBlock> {
        self.block.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_none()
    }

    pub fn clear(&mut self) {
        self.block = None;
    }

    /// Replace the region with a result card.
    pub fn render_success(&mut self, result: &AnalysisResult) {
        self.clear();
        let tips = if result.tips.is_empty() {
            None
        } else {
            Some(result.tips.clone())
        };
        self.block = Some(OutputBlock::Result {
            title: result.level.clone(),
            body: result.description.clone(),
            tips,
        });
    }

    /// Replace the region with an error card.
    pub fn render_error(&mut self, message: &str) {
        self.clear();
        self.block = Some(OutputBlock::Error {
            message: message.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

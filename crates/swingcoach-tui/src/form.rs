// Form state: focus handling and per-field editing.

use swingcoach_core::request::{clamp_familiarity, FormFields, FAMILIARITY_MAX, FAMILIARITY_MIN};

/// Longest text accepted in the score and age inputs.
const MAX_TEXT_LEN: usize = 6;

/// Focusable form rows, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Score,
    Frequency,
    Age,
    Familiarity,
    BestClub,
    WorstClub,
    Submit,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Score,
        Field::Frequency,
        Field::Age,
        Field::Familiarity,
        Field::BestClub,
        Field::WorstClub,
        Field::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Score => "Average 18-hole score",
            Field::Frequency => "Rounds per month",
            Field::Age => "Age you started playing",
            Field::Familiarity => "Familiarity with golf",
            Field::BestClub => "Best club",
            Field::WorstClub => "Worst club",
            Field::Submit => "",
        }
    }

    /// Whether the field takes typed text.
    pub fn is_text(self) -> bool {
        matches!(self, Field::Score | Field::Age)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Live form contents plus the focused row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub focus: Field,
    pub fields: FormFields,
}

impl FormState {
    pub fn new(default_familiarity: u8) -> Self {
        FormState {
            focus: Field::Score,
            fields: FormFields {
                familiarity: clamp_familiarity(default_familiarity),
                ..FormFields::default()
            },
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Score => Some(&mut self.fields.score),
            Field::Age => Some(&mut self.fields.age),
            _ => None,
        }
    }

    /// Type a character into the focused text field. Returns `false` when
    /// the focused field does not take text.
    pub fn insert_char(&mut self, c: char) -> bool {
        match self.focused_text() {
            Some(text) => {
                if text.chars().count() < MAX_TEXT_LEN && !c.is_control() {
                    text.push(c);
                }
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Step the focused selector or slider forward (Right arrow).
    pub fn increment(&mut self) {
        let f = &mut self.fields;
        match self.focus {
            Field::Frequency => f.frequency = f.frequency.next(),
            Field::Familiarity => f.familiarity = (f.familiarity + 1).min(FAMILIARITY_MAX),
            Field::BestClub => f.best_club = f.best_club.next(),
            Field::WorstClub => f.worst_club = f.worst_club.next(),
            _ => {}
        }
    }

    /// Step the focused selector or slider backward (Left arrow).
    pub fn decrement(&mut self) {
        let f = &mut self.fields;
        match self.focus {
            Field::Frequency => f.frequency = f.frequency.prev(),
            Field::Familiarity => {
                f.familiarity = f.familiarity.saturating_sub(1).max(FAMILIARITY_MIN)
            }
            Field::BestClub => f.best_club = f.best_club.prev(),
            Field::WorstClub => f.worst_club = f.worst_club.prev(),
            _ => {}
        }
    }

    /// Copy of the field values as they read right now.
    pub fn snapshot(&self) -> FormFields {
        self.fields.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

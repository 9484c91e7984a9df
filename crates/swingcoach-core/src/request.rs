// Input collection: turns the raw form contents into a validated
// `AnalysisRequest`.

use thiserror::Error;

use crate::golf::{Club, Frequency};

/// Message shown when score or age cannot be parsed.
pub const VALIDATION_MESSAGE: &str = "Please enter a valid number for your score and age.";

/// Familiarity slider bounds (inclusive).
pub const FAMILIARITY_MIN: u8 = 1;
pub const FAMILIARITY_MAX: u8 = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw form contents at the moment of submission.
///
/// Score and age are kept as typed text; only `collect` decides whether
/// they are usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub score: String,
    pub frequency: Frequency,
    pub age: String,
    pub familiarity: u8,
    pub best_club: Club,
    pub worst_club: Club,
}

impl Default for FormFields {
    fn default() -> Self {
        FormFields {
            score: String::new(),
            frequency: Frequency::default(),
            age: String::new(),
            familiarity: 5,
            best_club: Club::Driver,
            worst_club: Club::Putter,
        }
    }
}

/// A fully validated analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Average 18-hole score.
    pub score: i32,
    pub frequency: Frequency,
    /// Age at which the golfer started playing.
    pub age: i32,
    /// Self-rated familiarity with the game, 1-10.
    pub familiarity: u8,
    pub best_club: Club,
    pub worst_club: Club,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("score is not a whole number: {0:?}")]
    InvalidScore(String),

    #[error("age is not a whole number: {0:?}")]
    InvalidAge(String),
}

impl ValidationError {
    /// The message displayed to the user for any validation failure.
    pub fn user_message(&self) -> &'static str {
        VALIDATION_MESSAGE
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Validate the form contents and build an `AnalysisRequest`.
///
/// Score is checked before age, so a form with both fields invalid reports
/// the score.
pub fn collect(fields: &FormFields) -> Result<AnalysisRequest, ValidationError> {
    let score = parse_whole_number(&fields.score)
        .ok_or_else(|| ValidationError::InvalidScore(fields.score.clone()))?;
    let age = parse_whole_number(&fields.age)
        .ok_or_else(|| ValidationError::InvalidAge(fields.age.clone()))?;

    Ok(AnalysisRequest {
        score,
        frequency: fields.frequency,
        age,
        familiarity: clamp_familiarity(fields.familiarity),
        best_club: fields.best_club,
        worst_club: fields.worst_club,
    })
}

/// Clamp a slider value into the 1-10 familiarity range.
pub fn clamp_familiarity(value: u8) -> u8 {
    value.clamp(FAMILIARITY_MIN, FAMILIARITY_MAX)
}

/// The whole trimmed text must be an integer. Leading-digit prefixes such
/// as `"90abc"` or `"12.5"` are rejected, not truncated.
fn parse_whole_number(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

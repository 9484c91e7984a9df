// Analysis outcome types shared by the client, the controller, and the TUI.

use thiserror::Error;

/// Message shown for any failed analysis call. The underlying cause is
/// logged, never displayed.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while analyzing your score. Please try again.";

/// Skill assessment returned by the coaching model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Skill level, e.g. "Beginner" or "Mid-Handicapper". Never empty.
    pub level: String,
    pub description: String,
    /// Improvement tips in the order the model gave them.
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Transport or service-side failure of the external call.
    #[error("analysis service failure: {0}")]
    ServiceFailure(String),

    /// The service answered but the payload did not match the expected shape.
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_error_kinds_share_the_generic_message() {
        let service = AnalysisError::ServiceFailure("timeout".into());
        let malformed = AnalysisError::MalformedResponse("missing level".into());
        assert_eq!(service.user_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(malformed.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn error_display_keeps_the_cause() {
        let err = AnalysisError::ServiceFailure("API returned status 503".into());
        assert_eq!(err.to_string(), "analysis service failure: API returned status 503");
    }
}

// Prompt templates for golfer skill analysis.
//
// Produces the fixed coaching system instruction, the user message built
// from the six form answers, and the structured response contract the
// model must follow.

use serde_json::{json, Value};
use swingcoach_core::request::AnalysisRequest;

/// Everything sent to the model for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub system_instruction: String,
    pub user_message: String,
    /// Gemini `responseSchema` object describing the expected JSON.
    pub response_schema: Value,
}

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Return the static system instruction for every analysis call.
pub fn system_instruction() -> String {
    "You are a friendly, encouraging golf coach. You will receive a golfer's details: \
     average 18-hole score, how often they play each month, the age they started playing, \
     their familiarity with golf on a 1-10 scale, their best club, and their worst club.\n\
     \n\
     From all of this, determine their skill level and reply with:\n\
     1. level: a short skill label (e.g. Beginner, High-Handicapper, Mid-Handicapper, \
     Low-Handicapper, Scratch Golfer, Professional)\n\
     2. description: a brief, encouraging description of that level\n\
     3. tips: 2-3 concise, actionable tips for improvement\n\
     \n\
     Personalize every tip: give a concrete drill for the worst club and a way to lean on \
     the best club. Match the complexity of the advice to the familiarity score. Keep a \
     supportive, positive tone. Respond in JSON only."
        .to_string()
}

// ---------------------------------------------------------------------------
// Response contract
// ---------------------------------------------------------------------------

/// The structural contract for the model's reply.
///
/// `level`, `description`, and `tips` are all required; `tips` is an array
/// of strings. The 2-3 tip count is requested in the description but not
/// enforced.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "level": {
                "type": "STRING",
                "description": "The golfer's skill level (e.g., Beginner, High-Handicapper, \
                                Mid-Handicapper, Low-Handicapper, Scratch Golfer, Professional)."
            },
            "description": {
                "type": "STRING",
                "description": "A brief, encouraging description of this skill level."
            },
            "tips": {
                "type": "ARRAY",
                "description": "2-3 actionable, concise tips tailored to this level, playing \
                                frequency, best club, and worst club.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["level", "description", "tips"]
    })
}

// ---------------------------------------------------------------------------
// User message
// ---------------------------------------------------------------------------

/// Format the golfer's answers as a first-person message.
pub fn build_user_message(req: &AnalysisRequest) -> String {
    format!(
        "My average 18-hole score is {}, I play {} per month, I started playing at age {}, \
         my familiarity with golf is a {} out of 10. My best club is {} and my worst club is {}.",
        req.score,
        req.frequency.label(),
        req.age,
        req.familiarity,
        req.best_club.label(),
        req.worst_club.label(),
    )
}

/// Build the complete prompt bundle for a validated request.
pub fn build(req: &AnalysisRequest) -> PromptSpec {
    PromptSpec {
        system_instruction: system_instruction(),
        user_message: build_user_message(req),
        response_schema: response_schema(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

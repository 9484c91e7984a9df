// Prompt construction and the external analysis client.

pub mod client;
pub mod prompt;

pub use client::{AnalysisService, GeminiClient};
pub use prompt::PromptSpec;

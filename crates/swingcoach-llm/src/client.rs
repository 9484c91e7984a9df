// Gemini streaming client using reqwest-eventsource.
//
// Sends one `streamGenerateContent` request with `alt=sse`, concatenates the
// text parts of every streamed chunk, and validates the assembled JSON
// payload into an `AnalysisResult` once the stream ends.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest_eventsource::{Event, RequestBuilderExt};
use serde_json::Value;
use tracing::{debug, info, warn};

use swingcoach_core::analysis::{AnalysisError, AnalysisResult};
use swingcoach_core::config::Config;

use crate::prompt::PromptSpec;

// ---------------------------------------------------------------------------
// AnalysisService
// ---------------------------------------------------------------------------

/// Boundary to the external text-generation service.
///
/// One call to `analyze` makes exactly one outbound request attempt. There
/// are no retries and no timeout beyond what the transport imposes.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, spec: &PromptSpec) -> Result<AnalysisResult, AnalysisError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Streaming client for the Gemini Generative Language API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a client with a default HTTP client.
    pub fn new(api_key: String, api_base: String, model: String, max_output_tokens: u32) -> Self {
        Self::with_http(
            reqwest::Client::new(),
            api_key,
            api_base,
            model,
            max_output_tokens,
        )
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http(
        http: reqwest::Client,
        api_key: String,
        api_base: String,
        model: String,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            http,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            max_output_tokens,
        }
    }

    /// Build a client from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            config.llm.api_base.clone(),
            config.llm.model.clone(),
            config.llm.max_output_tokens,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the streaming endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.api_base, self.model
        )
    }

    /// Stream the model's reply and return the concatenated text.
    async fn stream_text(&self, spec: &PromptSpec) -> Result<String, AnalysisError> {
        let body = build_request_body(spec, self.max_output_tokens);

        let request = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body);

        let mut es = request.eventsource().map_err(|e| {
            AnalysisError::ServiceFailure(format!("failed to create event source: {e}"))
        })?;
        // Single attempt: never reconnect after an error or stream end.
        es.set_retry_policy(Box::new(reqwest_eventsource::retry::Never));

        let mut full_text = String::new();
        let mut chunk_count: usize = 0;

        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {
                    debug!("SSE connection opened");
                }
                Ok(Event::Message(msg)) => {
                    chunk_count += 1;
                    if let Some(reason) = parse_block_reason(&msg.data) {
                        es.close();
                        return Err(AnalysisError::ServiceFailure(format!(
                            "prompt blocked by service: {reason}"
                        )));
                    }
                    if let Some(text) = parse_chunk_text(&msg.data) {
                        full_text.push_str(&text);
                    }
                    if let Some(reason) = parse_finish_reason(&msg.data) {
                        debug!(%reason, "candidate finished");
                        if reason == "MAX_TOKENS" {
                            warn!("response truncated at max_output_tokens");
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => {
                    debug!(chunk_count, "SSE stream ended");
                    break;
                }
                Err(err) => {
                    es.close();
                    let message = describe_stream_error(err).await;
                    warn!(%message, "SSE stream error");
                    return Err(AnalysisError::ServiceFailure(message));
                }
            }
        }

        es.close();
        Ok(full_text)
    }
}

#[async_trait]
impl AnalysisService for GeminiClient {
    async fn analyze(&self, spec: &PromptSpec) -> Result<AnalysisResult, AnalysisError> {
        info!(model = %self.model, "requesting golfer analysis");
        let text = self.stream_text(spec).await?;
        debug!(bytes = text.len(), "analysis payload received");
        parse_analysis_payload(&text)
    }
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// Build the `generateContent` request body for a prompt.
pub(crate) fn build_request_body(spec: &PromptSpec, max_output_tokens: u32) -> Value {
    serde_json::json!({
        "systemInstruction": {
            "parts": [{ "text": spec.system_instruction }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": spec.user_message }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": spec.response_schema,
            "maxOutputTokens": max_output_tokens
        }
    })
}

// ---------------------------------------------------------------------------
// SSE JSON parsing helpers
// ---------------------------------------------------------------------------

/// Concatenate the text parts of the first candidate in a streamed chunk.
///
/// Expected shape: `{ "candidates": [{ "content": { "parts": [{ "text": "..." }] } }] }`
pub(crate) fn parse_chunk_text(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    let parts = v
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    Some(text)
}

/// Extract `finishReason` from the first candidate, if present.
pub(crate) fn parse_finish_reason(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("candidates")?
        .get(0)?
        .get("finishReason")?
        .as_str()
        .map(|s| s.to_string())
}

/// Extract `promptFeedback.blockReason`, set when the service refuses the
/// prompt outright.
pub(crate) fn parse_block_reason(data: &str) -> Option<String> {
    let v: Value = serde_json::from_str(data).ok()?;
    v.get("promptFeedback")?
        .get("blockReason")?
        .as_str()
        .map(|s| s.to_string())
}

/// Extract `error.message` from a Gemini error body.
pub(crate) fn parse_api_error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

/// Turn an SSE error into a log-friendly description, reading the response
/// body for non-success statuses.
async fn describe_stream_error(err: reqwest_eventsource::Error) -> String {
    match err {
        reqwest_eventsource::Error::InvalidStatusCode(status, response) => {
            let body = response.text().await.unwrap_or_default();
            match parse_api_error_message(&body) {
                Some(detail) => format!("API returned status {status}: {detail}"),
                None => format!("API returned status {status}"),
            }
        }
        reqwest_eventsource::Error::InvalidContentType(content_type, ..) => {
            format!("unexpected content type: {content_type:?}")
        }
        reqwest_eventsource::Error::Transport(e) => {
            format!("network error: {e}")
        }
        other => format!("stream error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Payload validation
// ---------------------------------------------------------------------------

/// Validate the assembled reply against the response contract.
///
/// The payload must be a JSON object with a non-empty string `level`, a
/// string `description`, and an array of strings `tips`. Extra fields are
/// ignored.
pub fn parse_analysis_payload(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let malformed = |msg: String| AnalysisError::MalformedResponse(msg);

    let v: Value =
        serde_json::from_str(text.trim()).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    let obj = v
        .as_object()
        .ok_or_else(|| malformed("expected a JSON object".into()))?;

    let level = obj
        .get("level")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing or non-string field `level`".into()))?;
    if level.trim().is_empty() {
        return Err(malformed("field `level` is empty".into()));
    }

    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing or non-string field `description`".into()))?;

    let tips = obj
        .get("tips")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing or non-array field `tips`".into()))?
        .iter()
        .enumerate()
        .map(|(i, tip)| {
            tip.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| malformed(format!("tips[{i}] is not a string")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisResult {
        level: level.to_string(),
        description: description.to_string(),
        tips,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

//! LLM agent module for per-chunk structured summarization.
//!
//! The model's reply is untrusted free text. The agent cuts out the span
//! between the first `{` and the last `}`, parses it strictly, checks the
//! required fields and retries within a fixed attempt budget. Transport
//! failures and malformed output share that budget; the distinction only
//! shows up in the logs.

pub use crate::summary::SummaryRecord;

use crate::config::AgentConfig;
use crate::prompt::build_prompt;
use crate::summary::REQUIRED_FIELDS;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

/// Capability to send a prompt to a language model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send `prompt` and return the raw response text
    async fn invoke(&self, prompt: &str) -> Result<String, AgentError>;
}

/// Why a single attempt produced no record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    #[error("model invocation failed: {0}")]
    Invocation(String),
    #[error("no JSON object found in response")]
    NoJson,
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("required field is blank: {0}")]
    EmptyField(&'static str),
}

/// Result of an attempt, or of a whole chunk once the budget is spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(SummaryRecord),
    /// The attempt failed; another may follow if the budget allows
    Retryable(RetryReason),
    /// Every attempt failed
    Exhausted,
}

impl Outcome {
    pub fn into_record(self) -> Option<SummaryRecord> {
        match self {
            Outcome::Success(record) => Some(record),
            Outcome::Retryable(_) | Outcome::Exhausted => None,
        }
    }
}

/// Summarizes chunks through a [`ModelClient`] with bounded retry.
pub struct SummaryAgent {
    client: Box<dyn ModelClient>,
    max_attempts: u32,
}

impl SummaryAgent {
    /// Create an agent using the attempt budget from `config`
    pub fn new(client: Box<dyn ModelClient>, config: &AgentConfig) -> Self {
        Self::with_max_attempts(client, config.max_attempts)
    }

    pub fn with_max_attempts(client: Box<dyn ModelClient>, max_attempts: u32) -> Self {
        Self {
            client,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Summarize one chunk, or `None` when every attempt failed
    pub async fn summarize(&self, chunk: &str) -> Option<SummaryRecord> {
        self.summarize_outcome(chunk).await.into_record()
    }

    /// Run the retry loop for one chunk; yields `Success` or `Exhausted`
    pub async fn summarize_outcome(&self, chunk: &str) -> Outcome {
        let prompt = build_prompt(chunk);

        for attempt in 1..=self.max_attempts {
            match self.attempt(&prompt).await {
                Outcome::Success(record) => {
                    debug!(attempt, "summary attempt succeeded");
                    return Outcome::Success(record);
                }
                Outcome::Retryable(reason) => {
                    warn!(attempt, max = self.max_attempts, %reason, "summary attempt failed");
                }
                Outcome::Exhausted => break,
            }
        }

        Outcome::Exhausted
    }

    /// A single model call followed by extraction and validation
    pub async fn attempt(&self, prompt: &str) -> Outcome {
        let response = match self.client.invoke(prompt).await {
            Ok(text) => text,
            Err(e) => return Outcome::Retryable(RetryReason::Invocation(e.to_string())),
        };

        match parse_response(&response) {
            Ok(record) => Outcome::Success(record),
            Err(reason) => Outcome::Retryable(reason),
        }
    }
}

/// Parse a raw model response into a validated record
pub fn parse_response(response: &str) -> Result<SummaryRecord, RetryReason> {
    let json = extract_json(response).ok_or(RetryReason::NoJson)?;

    let value: Value =
        serde_json::from_str(json).map_err(|e| RetryReason::InvalidJson(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| RetryReason::InvalidJson("expected a JSON object".to_string()))?;
    if let Some(field) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| object.get(*field).map_or(true, Value::is_null))
    {
        return Err(RetryReason::MissingField(field));
    }

    let record: SummaryRecord =
        serde_json::from_value(value).map_err(|e| RetryReason::InvalidJson(e.to_string()))?;

    match record.blank_field() {
        Some(field) => Err(RetryReason::EmptyField(field)),
        None => Ok(record),
    }
}

/// Slice from the first `{` through the last `}`
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

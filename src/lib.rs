//! # Summa Digest
//!
//! Summarises long documents with an LLM, one chunk at a time.
//!
//! ## Pipeline
//!
//! - **Chunking**: sentence-aware chunks bounded by a word budget
//! - **Structured Summaries**: each chunk becomes a validated `SummaryRecord`,
//!   with bounded retry against malformed model output
//! - **Merge**: per-chunk details plus a deduplicated action item list
//! - **Provider Agnostic**: OpenAI-compatible endpoints (incl. Ollama) and Gemini

pub mod agent;
pub mod chunker;
pub mod config;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod report;
pub mod source;
pub mod summary;
pub mod tokenizer;

pub use agent::{ModelClient, Outcome, RetryReason, SummaryAgent};
pub use chunker::{chunk, Chunk};
pub use config::Config;
pub use orchestrator::summarize_all;
pub use report::{merge, ActionItemEntry};
pub use summary::SummaryRecord;
pub use tokenizer::{RuleTokenizer, Tokenizer};

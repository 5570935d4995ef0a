//! Sequential driver that feeds chunks through the summarization agent.

use crate::agent::SummaryAgent;
use crate::chunker::Chunk;
use crate::summary::SummaryRecord;
use tracing::{info, warn};

/// Summarize every chunk in order, keeping only the ones that succeeded.
///
/// Chunks run one at a time so that report order and first-seen action
/// item precedence both follow document order. A failed chunk is logged and
/// skipped; the run itself never fails.
pub async fn summarize_all(agent: &SummaryAgent, chunks: &[Chunk]) -> Vec<SummaryRecord> {
    let mut summaries = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.iter().enumerate() {
        let number = index + 1;
        info!(chunk = number, words = chunk.word_count(), "summarising chunk");

        match agent.summarize(&chunk.text()).await {
            Some(record) => {
                info!(chunk = number, heading = %record.heading, "chunk summarised");
                summaries.push(record);
            }
            None => warn!(chunk = number, "no valid summary, skipping chunk"),
        }
    }

    info!(
        succeeded = summaries.len(),
        skipped = chunks.len() - summaries.len(),
        "all chunks processed"
    );
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentError, ModelClient};
    use crate::chunker::chunk;
    use crate::tokenizer::RuleTokenizer;
    use async_trait::async_trait;

    /// Answers based on a marker word in the prompt
    struct MarkerClient;

    #[async_trait]
    impl ModelClient for MarkerClient {
        async fn invoke(&self, prompt: &str) -> Result<String, AgentError> {
            if prompt.contains("Broken") {
                Err(AgentError::RequestFailed("connection reset".to_string()))
            } else if prompt.contains("Alpha") {
                Ok(r#"{"heading": "Alpha", "main_point": "A.", "action_items": ["a"]}"#.to_string())
            } else {
                Ok(r#"{"heading": "Gamma", "main_point": "G.", "action_items": ["g"]}"#.to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_failed_chunks_are_skipped_in_order() {
        let tok = RuleTokenizer::new();
        let chunks = chunk("Alpha one two. Broken three four. Gamma five six.", 4, &tok);
        assert_eq!(chunks.len(), 3);

        let agent = SummaryAgent::with_max_attempts(Box::new(MarkerClient), 2);
        let summaries = summarize_all(&agent, &chunks).await;

        let headings: Vec<&str> = summaries.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Alpha", "Gamma"]);
    }

    #[tokio::test]
    async fn test_no_chunks_no_summaries() {
        let agent = SummaryAgent::with_max_attempts(Box::new(MarkerClient), 2);
        assert!(summarize_all(&agent, &[]).await.is_empty());
    }
}

//! SummaryRecord struct - the validated structured output for one chunk.

use serde::{Deserialize, Serialize};

/// Keys every model response must carry for a record to be accepted.
pub const REQUIRED_FIELDS: [&str; 3] = ["heading", "main_point", "action_items"];

/// Structured summary of a single chunk.
///
/// Built only by the summarization agent after the model's JSON has been
/// parsed and validated; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Short heading for the chunk (3-7 words requested)
    pub heading: String,
    /// One-sentence main point of the chunk
    pub main_point: String,
    /// Actionable items; three are requested but not enforced
    pub action_items: Vec<String>,
}

impl SummaryRecord {
    /// Create a new summary record
    pub fn new(
        heading: impl Into<String>,
        main_point: impl Into<String>,
        action_items: Vec<String>,
    ) -> Self {
        Self {
            heading: heading.into(),
            main_point: main_point.into(),
            action_items,
        }
    }

    /// Name of the first text field that is blank, if any
    pub fn blank_field(&self) -> Option<&'static str> {
        if self.heading.trim().is_empty() {
            Some("heading")
        } else if self.main_point.trim().is_empty() {
            Some("main_point")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_field_detection() {
        let ok = SummaryRecord::new("Heading", "Point.", vec![]);
        assert_eq!(ok.blank_field(), None);

        let no_heading = SummaryRecord::new("  ", "Point.", vec![]);
        assert_eq!(no_heading.blank_field(), Some("heading"));

        let no_point = SummaryRecord::new("Heading", "", vec!["a".into()]);
        assert_eq!(no_point.blank_field(), Some("main_point"));
    }

    #[test]
    fn test_deserialize_ignores_extra_keys() {
        let json = r#"{"heading":"H","main_point":"M","action_items":["a"],"extra":1}"#;
        let record: SummaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.action_items, vec!["a".to_string()]);
    }
}

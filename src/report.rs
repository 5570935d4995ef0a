//! Final report: per-chunk details plus a deduplicated action item list.

use crate::summary::SummaryRecord;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Write;

/// Returned by [`merge`] when no chunk produced a summary
pub const NO_SUMMARIES: &str = "No valid summaries were generated.";

lazy_static! {
    static ref NON_WORD_RE: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// One consolidated action item, keyed in first-seen order starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemEntry {
    pub key: usize,
    /// Original phrasing of the first occurrence
    pub text: String,
}

/// Comparison key for action items: lowercase, punctuation removed, trimmed
pub fn normalize(item: &str) -> String {
    NON_WORD_RE
        .replace_all(&item.to_lowercase(), "")
        .trim()
        .to_string()
}

/// Deduplicate action items across summaries, keeping first-seen phrasing.
pub fn consolidate(summaries: &[SummaryRecord]) -> Vec<ActionItemEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<ActionItemEntry> = Vec::new();

    for item in summaries.iter().flat_map(|s| &s.action_items) {
        if !seen.insert(normalize(item)) {
            continue;
        }
        entries.push(ActionItemEntry {
            key: entries.len() + 1,
            text: item.clone(),
        });
    }

    entries
}

/// Render the detailed and consolidated sections into one report.
pub fn merge(summaries: &[SummaryRecord]) -> String {
    if summaries.is_empty() {
        return NO_SUMMARIES.to_string();
    }

    let mut detailed = String::from("=== DETAILED CHUNK SUMMARIES ===\n\n");
    for (i, summary) in summaries.iter().enumerate() {
        let _ = writeln!(detailed, "CHUNK {}: {}", i + 1, summary.heading);
        let _ = writeln!(detailed, "Main Point: {}", summary.main_point);
        detailed.push_str("Action Items:\n");
        for (j, item) in summary.action_items.iter().enumerate() {
            let _ = writeln!(detailed, "  {}. {}", j + 1, item);
        }
        detailed.push('\n');
    }

    let mut consolidated = String::from("=== CONSOLIDATED ACTION ITEMS ===\n");
    for entry in consolidate(summaries) {
        let _ = writeln!(consolidated, "{}. {}", entry.key, entry.text);
    }

    format!("{}\n{}", detailed, consolidated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(heading: &str, items: &[&str]) -> SummaryRecord {
        SummaryRecord::new(
            heading,
            format!("{} matters.", heading),
            items.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_merge_empty_returns_sentinel() {
        assert_eq!(merge(&[]), NO_SUMMARIES);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Use clear headers. "), "use clear headers");
        assert_eq!(normalize("Don't   panic!"), "dont   panic");
        assert_eq!(normalize("snake_case stays"), "snake_case stays");
    }

    #[test]
    fn test_duplicates_keep_first_phrasing() {
        let summaries = vec![
            record("One", &["Use clear headers.", "Bold totals"]),
            record("Two", &["use clear headers", "Freeze panes"]),
        ];
        let entries = consolidate(&summaries);
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Use clear headers.", "Bold totals", "Freeze panes"]);
        let keys: Vec<usize> = entries.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_layout() {
        let summaries = vec![
            record("Headers", &["Use clear headers.", "Bold totals"]),
            record("Panes", &["USE CLEAR HEADERS!"]),
        ];
        let expected = "\
=== DETAILED CHUNK SUMMARIES ===

CHUNK 1: Headers
Main Point: Headers matters.
Action Items:
  1. Use clear headers.
  2. Bold totals

CHUNK 2: Panes
Main Point: Panes matters.
Action Items:
  1. USE CLEAR HEADERS!


=== CONSOLIDATED ACTION ITEMS ===
1. Use clear headers.
2. Bold totals
";
        assert_eq!(merge(&summaries), expected);
    }

    #[test]
    fn test_summary_without_action_items() {
        let report = merge(&[record("Quiet", &[])]);
        assert!(report.contains("CHUNK 1: Quiet\n"));
        assert!(report.ends_with("=== CONSOLIDATED ACTION ITEMS ===\n"));
    }
}

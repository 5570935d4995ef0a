//! Prompt template for per-chunk summaries.

/// Build the summarization prompt for one chunk.
///
/// The chunk is embedded verbatim; the template fixes the JSON shape the
/// agent validates against and shows one worked example.
pub fn build_prompt(chunk: &str) -> String {
    format!(
        r#"You are an expert at summarizing technical content in strict JSON format.

INPUT TEXT:
{chunk}

YOUR TASK:
1. Create a SHORT heading (3-7 words)
2. Write a CONCISE main point (1 sentence)
3. List 3 ACTIONABLE items (bullet points)

REQUIRED JSON FORMAT:
```json
{{
    "heading": "string",
    "main_point": "string",
    "action_items": ["string", "string", "string"]
}}
```

EXAMPLE:
```json
{{
    "heading": "Spreadsheet Formatting Basics",
    "main_point": "Proper formatting improves spreadsheet readability and functionality.",
    "action_items": [
        "Use clear column headers",
        "Apply consistent cell formatting",
        "Add borders to important sections"
    ]
}}
```

Respond with the JSON object only."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_chunk_verbatim() {
        let chunk = "Some {braced} text with \"quotes\".";
        let prompt = build_prompt(chunk);
        assert!(prompt.contains("INPUT TEXT:\nSome {braced} text with \"quotes\".\n"));
    }

    #[test]
    fn test_prompt_is_deterministic_and_names_fields() {
        let a = build_prompt("chunk");
        assert_eq!(a, build_prompt("chunk"));
        for field in crate::summary::REQUIRED_FIELDS {
            assert!(a.contains(&format!("\"{}\"", field)));
        }
        assert!(a.contains("Spreadsheet Formatting Basics"));
    }
}

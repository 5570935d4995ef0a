//! Sentence and word tokenization.
//!
//! The chunker only depends on the [`Tokenizer`] trait; [`RuleTokenizer`] is a
//! punctuation-driven default that keeps punctuation marks as their own word
//! tokens, so word counts line up with common NLP tokenizers.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Words (with inner apostrophes, hyphens and decimal points) or single punctuation marks
    static ref WORD_RE: Regex = Regex::new(r"\w+(?:['’.\-]\w+)*|[^\w\s]").unwrap();
}

/// Characters that terminate a sentence
const TERMINALS: [char; 3] = ['.', '!', '?'];

/// Characters allowed to trail a terminal (closing quotes and brackets)
const CLOSERS: [char; 6] = ['"', '\'', '”', '’', ')', ']'];

/// Lowercased tokens that end in a period without ending a sentence
const ABBREVIATIONS: [&str; 12] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "e.g", "i.e", "fig",
];

/// Splits raw text into sentences and words.
pub trait Tokenizer: Send + Sync {
    /// Ordered sentences of `text`, trimmed, never empty
    fn split_sentences(&self, text: &str) -> Vec<String>;

    /// Ordered word tokens of `text`
    fn split_words(&self, text: &str) -> Vec<String>;

    /// Number of word tokens in `text`
    fn count_words(&self, text: &str) -> usize {
        self.split_words(text).len()
    }
}

/// Rule-based tokenizer for Latin-script prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for RuleTokenizer {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            let boundary = if TERMINALS.contains(&c) {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if TERMINALS.contains(&next) || CLOSERS.contains(&next) {
                        end = j + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                match chars.peek() {
                    None => Some(end),
                    Some(&(_, next)) if next.is_whitespace() => {
                        if c == '.' && ends_with_abbreviation(&text[start..i]) {
                            None
                        } else {
                            Some(end)
                        }
                    }
                    _ => None,
                }
            } else if c == '\n' && matches!(chars.peek(), Some(&(_, '\n'))) {
                // Blank line closes a paragraph even without punctuation
                Some(i)
            } else {
                None
            };

            if let Some(end) = boundary {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    fn split_words(&self, text: &str) -> Vec<String> {
        WORD_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Whether the text before a period ends in a known abbreviation or an initial
fn ends_with_abbreviation(before: &str) -> bool {
    let Some(last) = before.split_whitespace().last() else {
        return false;
    };
    let token = last.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = token.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        if first.is_uppercase() {
            return true;
        }
    }

    ABBREVIATIONS.contains(&token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_on_terminals() {
        let tok = RuleTokenizer::new();
        let sentences = tok.split_sentences("First one. Second one!  Third one? Fourth");
        assert_eq!(
            sentences,
            vec!["First one.", "Second one!", "Third one?", "Fourth"]
        );
    }

    #[test]
    fn test_split_sentences_keeps_abbreviations_and_decimals() {
        let tok = RuleTokenizer::new();
        let sentences =
            tok.split_sentences("Dr. Smith paid 3.5 dollars, e.g. cash. J. Doe agreed.");
        assert_eq!(
            sentences,
            vec!["Dr. Smith paid 3.5 dollars, e.g. cash.", "J. Doe agreed."]
        );
    }

    #[test]
    fn test_split_sentences_closing_quote_and_blank_line() {
        let tok = RuleTokenizer::new();
        let text = "He said \"stop.\" Then left.\n\nHeading without stop\n\nLast line.";
        let sentences = tok.split_sentences(text);
        assert_eq!(
            sentences,
            vec![
                "He said \"stop.\"",
                "Then left.",
                "Heading without stop",
                "Last line."
            ]
        );
    }

    #[test]
    fn test_split_sentences_empty() {
        let tok = RuleTokenizer::new();
        assert!(tok.split_sentences("").is_empty());
        assert!(tok.split_sentences("   \n\n  ").is_empty());
    }

    #[test]
    fn test_split_words_separates_punctuation() {
        let tok = RuleTokenizer::new();
        let words = tok.split_words("Use clear headers, don't wait: v1.2 now.");
        assert_eq!(
            words,
            vec!["Use", "clear", "headers", ",", "don't", "wait", ":", "v1.2", "now", "."]
        );
        assert_eq!(tok.count_words("one two three."), 4);
    }
}

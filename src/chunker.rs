//! Word-bounded, sentence-aware chunking.

use crate::tokenizer::Tokenizer;

/// Default maximum number of words per chunk
pub const DEFAULT_MAX_WORDS: usize = 200;

/// A run of consecutive sentences from the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    sentences: Vec<String>,
    word_count: usize,
}

impl Chunk {
    fn new(sentences: Vec<String>, word_count: usize) -> Self {
        Self {
            sentences,
            word_count,
        }
    }

    /// Sentences in document order
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Word tokens across all sentences
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Sentences joined with a single space
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }

    /// A chunk made of one sentence that alone exceeds `max_words`
    pub fn is_oversized(&self, max_words: usize) -> bool {
        self.word_count > max_words
    }
}

/// Split `text` into chunks of at most `max_words` words.
///
/// Sentences are never split: a sentence longer than `max_words` becomes a
/// chunk on its own.
pub fn chunk(text: &str, max_words: usize, tokenizer: &dyn Tokenizer) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0;

    for sentence in tokenizer.split_sentences(text) {
        let words = tokenizer.count_words(&sentence);
        if current_len + words <= max_words {
            current.push(sentence);
            current_len += words;
        } else {
            if !current.is_empty() {
                chunks.push(Chunk::new(std::mem::take(&mut current), current_len));
            }
            current.push(sentence);
            current_len = words;
        }
    }

    if !current.is_empty() {
        chunks.push(Chunk::new(current, current_len));
    }

    chunks
}

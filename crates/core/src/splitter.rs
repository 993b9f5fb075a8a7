//! Sentence Tokenization
//!
//! Splits one sentence into the display tokens the learner reorders. Words
//! shorter than the configured minimum are merged with the word that follows
//! them, so the board never shows bare articles and particles on their own.

/// Default minimum token length, in characters.
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

/// Splits a sentence into guessable tokens.
#[derive(Debug, Clone, Copy)]
pub struct WordSplitter {
    min_word_len: usize,
}

impl Default for WordSplitter {
    fn default() -> Self {
        Self {
            min_word_len: DEFAULT_MIN_WORD_LEN,
        }
    }
}

impl WordSplitter {
    /// Creates a splitter with a custom minimum word length.
    pub fn new(min_word_len: usize) -> Self {
        Self { min_word_len }
    }

    /// Splits `sentence` on whitespace, merging short words forward.
    ///
    /// A word below the minimum length (counted in characters, not bytes)
    /// consumes the word after it into one merged token. Merging is not
    /// applied again to the merged result, and the last word always stands
    /// alone. Deterministic for a given input; an empty sentence yields an
    /// empty vec.
    pub fn split(&self, sentence: &str) -> Vec<String> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        let mut tokens = Vec::with_capacity(words.len());
        let mut i = 0;
        while i < words.len() {
            let word = words[i];
            if word.chars().count() < self.min_word_len && i < words.len() - 1 {
                tokens.push(format!("{} {}", word, words[i + 1]));
                i += 2;
            } else {
                tokens.push(word.to_string());
                i += 1;
            }
        }
        tokens
    }
}

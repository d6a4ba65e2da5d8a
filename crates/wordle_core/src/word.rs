//! Normalized words: uppercased letter sequences compared position by position.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// An uppercased word.
///
/// Both guesses and secret words are stored as `Word`. Length is counted in
/// characters, not bytes, so a guess containing non-ASCII letters is measured
/// the same way it is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[display("{text}")]
pub struct Word {
    text: String,
    letters: Vec<char>,
}

impl Word {
    /// Creates a word from raw input, uppercasing it.
    pub fn new(raw: &str) -> Self {
        let text = raw.to_uppercase();
        let letters = text.chars().collect();
        Self { text, letters }
    }

    /// Number of letters in the word.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns true when the word has no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Letters in order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The word as an uppercase string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the letter occurs at any position.
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }
}

impl From<String> for Word {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for Word {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

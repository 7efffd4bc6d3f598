//! Wordle word representation
//!
//! A Word stores a lowercase ASCII word of 5 to 8 letters. `WordLength` is the
//! closed set of lengths a game can be played with.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a playable word, always in `5..=8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WordLength(u8);

impl WordLength {
    /// Shortest supported word
    pub const MIN: Self = Self(5);

    /// Longest supported word
    pub const MAX: Self = Self(8);

    /// Every supported length, shortest first
    pub const ALL: [Self; 4] = [Self(5), Self(6), Self(7), Self(8)];

    /// Create a length, rejecting anything outside `5..=8`
    ///
    /// # Errors
    /// Returns `WordError::InvalidLength` for unsupported lengths.
    pub fn new(len: usize) -> Result<Self, WordError> {
        match u8::try_from(len) {
            Ok(n) if (Self::MIN.0..=Self::MAX.0).contains(&n) => Ok(Self(n)),
            _ => Err(WordError::InvalidLength(len)),
        }
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Attempts a fresh game of this length starts with (`length + 1`)
    #[inline]
    #[must_use]
    pub const fn initial_attempts(self) -> u8 {
        self.0 + 1
    }
}

impl Default for WordLength {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for WordLength {
    type Error = WordError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value))
    }
}

impl From<WordLength> for u8 {
    fn from(length: WordLength) -> Self {
        length.0
    }
}

impl FromStr for WordLength {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len: usize = s
            .trim()
            .parse()
            .map_err(|_| WordError::UnparsableLength(s.to_string()))?;
        Self::new(len)
    }
}

impl fmt::Display for WordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lowercase Wordle word of a supported length
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be 5 to 8 letters long, got {0}")]
    InvalidLength(usize),

    #[error("word must contain only ASCII letters")]
    NonAscii,

    #[error("word contains invalid characters")]
    InvalidCharacters,

    #[error("'{0}' is not a word length")]
    UnparsableLength(String),
}

impl Word {
    /// Create a new Word from a string
    ///
    /// The text is lower-cased before validation.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not between 5 and 8
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("toolongword").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        WordLength::new(text.chars().count())?;

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !text.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length of the word
    #[inline]
    #[must_use]
    pub fn length(&self) -> WordLength {
        // Validated on construction
        WordLength(self.text.len() as u8)
    }

    /// Get the character at a specific position
    ///
    /// # Panics
    /// Panics if position is past the end of the word
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> u8 {
        self.bytes()[position]
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: u8) -> bool {
        self.bytes().contains(&letter)
    }

    /// Get the count of each letter in the word
    ///
    /// Used for scoring with duplicate letters.
    #[inline]
    #[must_use]
    pub fn char_counts(&self) -> FxHashMap<u8, u8> {
        let mut counts = FxHashMap::default();
        for &ch in self.bytes() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("crane").unwrap();
        assert_eq!(word.text(), "crane");
        assert_eq!(word.bytes(), b"crane");
        assert_eq!(word.length().get(), 5);
    }

    #[test]
    fn word_creation_all_supported_lengths() {
        for text in ["crane", "banana", "journey", "mountain"] {
            let word = Word::new(text).unwrap();
            assert_eq!(word.length().get(), text.len());
        }
    }

    #[test]
    fn word_creation_uppercase_normalized() {
        let word = Word::new("CRANE").unwrap();
        assert_eq!(word.text(), "crane");

        let word2 = Word::new("CrAnE").unwrap();
        assert_eq!(word2.text(), "crane");
    }

    #[test]
    fn word_creation_invalid_length() {
        assert!(matches!(Word::new("shrt"), Err(WordError::InvalidLength(4))));
        assert!(matches!(
            Word::new("elephants"),
            Err(WordError::InvalidLength(9))
        ));
        assert!(matches!(Word::new(""), Err(WordError::InvalidLength(0))));
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert!(matches!(
            Word::new("cran3"),
            Err(WordError::InvalidCharacters)
        ));
        assert!(matches!(
            Word::new("cran "),
            Err(WordError::InvalidCharacters)
        ));
        assert!(matches!(Word::new("crané"), Err(WordError::NonAscii)));
    }

    #[test]
    fn word_char_at_and_has_letter() {
        let word = Word::new("crane").unwrap();
        assert_eq!(word.char_at(0), b'c');
        assert_eq!(word.char_at(4), b'e');
        assert!(word.has_letter(b'r'));
        assert!(!word.has_letter(b'z'));
    }

    #[test]
    fn word_char_counts_duplicates() {
        let word = Word::new("speed").unwrap();
        let counts = word.char_counts();
        assert_eq!(counts.get(&b's'), Some(&1));
        assert_eq!(counts.get(&b'e'), Some(&2));
        assert_eq!(counts.get(&b'z'), None);
    }

    #[test]
    fn word_serde_as_plain_string() {
        let word = Word::new("crane").unwrap();
        let json = serde_json::to_string(&word).unwrap();
        assert_eq!(json, "\"crane\"");

        let back: Word = serde_json::from_str(&json).unwrap();
        assert_eq!(back, word);
        assert!(serde_json::from_str::<Word>("\"abc\"").is_err());
    }

    #[test]
    fn word_length_bounds() {
        assert!(WordLength::new(4).is_err());
        assert!(WordLength::new(9).is_err());
        assert_eq!(WordLength::new(7).unwrap().initial_attempts(), 8);
        assert_eq!("6".parse::<WordLength>().unwrap().get(), 6);
        assert!(matches!(
            "six".parse::<WordLength>(),
            Err(WordError::UnparsableLength(_))
        ));
    }
}

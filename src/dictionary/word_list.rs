//! In-memory dictionary grouped by word length

use super::{DictionaryError, WORDS_5, WORDS_6, WORDS_7, WORDS_8, WordDictionary};
use crate::core::{Word, WordLength};
use rand::RngCore;
use rand::prelude::IndexedRandom;
use rustc_hash::FxHashMap;

/// Sorted, de-duplicated words bucketed by length
#[derive(Debug, Clone, Default)]
pub struct WordList {
    by_length: FxHashMap<WordLength, Vec<Word>>,
}

impl WordList {
    /// Build a list from raw strings, skipping anything that is not a valid word
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{Word, WordLength};
    /// use wordle_engine::dictionary::{WordDictionary, WordList};
    ///
    /// let list = WordList::from_words(["Crane", "crane", "banana", "x"]);
    /// assert_eq!(list.len(), 2);
    /// assert!(list.contains(WordLength::MIN, &Word::new("crane").unwrap()));
    /// ```
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_length: FxHashMap<WordLength, Vec<Word>> = FxHashMap::default();
        for word in words.into_iter().filter_map(|s| Word::new(s.as_ref()).ok()) {
            by_length.entry(word.length()).or_default().push(word);
        }

        for bucket in by_length.values_mut() {
            bucket.sort_unstable();
            bucket.dedup();
        }

        Self { by_length }
    }

    /// The word lists compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_words(
            WORDS_5
                .iter()
                .chain(WORDS_6)
                .chain(WORDS_7)
                .chain(WORDS_8),
        )
    }

    /// All words of `length`, sorted
    #[must_use]
    pub fn words(&self, length: WordLength) -> &[Word] {
        self.by_length
            .get(&length)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of words across all lengths
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_length.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WordDictionary for WordList {
    fn random_word(
        &self,
        length: WordLength,
        rng: &mut dyn RngCore,
    ) -> Result<Word, DictionaryError> {
        self.words(length)
            .choose(rng)
            .cloned()
            .ok_or(DictionaryError::NoWordsAvailable(length))
    }

    fn contains(&self, length: WordLength, word: &Word) -> bool {
        word.length() == length && self.words(length).binary_search(word).is_ok()
    }
}

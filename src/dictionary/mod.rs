//! Word dictionaries
//!
//! The engine only asks two things of a dictionary: is this word playable, and
//! give me a random target of a given length. Both go through
//! [`WordDictionary`] so games can run against the embedded lists, a file
//! loaded at startup, or a handful of words in a test.

mod embedded;
pub mod loader;
mod word_list;

pub use embedded::{WORDS_5, WORDS_6, WORDS_7, WORDS_8};
pub use word_list::WordList;

use crate::core::{Word, WordLength};
use rand::RngCore;
use thiserror::Error;

/// Errors raised by a dictionary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    #[error("no {0}-letter words available")]
    NoWordsAvailable(WordLength),
}

/// Source of playable words
pub trait WordDictionary: Send + Sync {
    /// Pick a target word of `length` uniformly at random
    ///
    /// # Errors
    /// Returns `DictionaryError::NoWordsAvailable` when the dictionary holds no
    /// word of that length.
    fn random_word(&self, length: WordLength, rng: &mut dyn RngCore)
    -> Result<Word, DictionaryError>;

    /// Check whether `word` is a playable word of `length`
    fn contains(&self, length: WordLength, word: &Word) -> bool;
}

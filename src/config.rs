//! Runtime settings
//!
//! Resolved once by the binary from command-line flags and `WORDLE_*`
//! environment variables, then passed down explicitly.

use crate::core::HardModeRule;
use crate::dictionary::{WordList, loader};
use crate::storage::{self, JsonFileStorage};
use std::io;
use std::path::PathBuf;

/// Default database file, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "wordle.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON database file
    pub data_path: PathBuf,
    /// Word list replacing the embedded one
    pub words_path: Option<PathBuf>,
    pub hard_mode_rule: HardModeRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            words_path: None,
            hard_mode_rule: HardModeRule::default(),
        }
    }
}

impl Config {
    /// Load the configured dictionary
    ///
    /// # Errors
    /// Returns an I/O error if a word list file was configured but cannot be read.
    pub fn dictionary(&self) -> io::Result<WordList> {
        match &self.words_path {
            Some(path) => {
                let words = loader::load_from_file(path)?;
                tracing::debug!("Loaded {} words from {}", words.len(), path.display());
                Ok(words)
            }
            None => Ok(WordList::embedded()),
        }
    }

    /// Open the configured database
    ///
    /// # Errors
    /// Returns a storage error if the database file exists but is unreadable.
    pub fn storage(&self) -> storage::Result<JsonFileStorage> {
        JsonFileStorage::open(&self.data_path)
    }
}

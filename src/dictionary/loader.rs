//! Word list loading utilities
//!
//! Word list files hold one word per line. Lines are trimmed and lower-cased;
//! blank lines and anything that is not a 5 to 8 letter word are skipped.

use super::WordList;
use std::fs;
use std::io;
use std::path::Path;

/// Load a word list from a file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use wordle_engine::dictionary::loader::load_from_file;
///
/// let words = load_from_file("data/words5.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordList> {
    let content = fs::read_to_string(path)?;
    Ok(parse_lines(&content))
}

/// Build a word list from newline-separated text
#[must_use]
pub fn parse_lines(content: &str) -> WordList {
    WordList::from_words(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty()),
    )
}

//! Formatting utilities for terminal output

use crate::core::{Classification, Feedback, Word};
use colored::{ColoredString, Colorize};

/// One letter tile, colored by its classification
#[must_use]
pub fn tile(letter: char, classification: Classification) -> ColoredString {
    let text = format!(" {} ", letter.to_ascii_uppercase());
    match classification {
        Classification::Exact => text.black().on_green().bold(),
        Classification::Present => text.black().on_yellow().bold(),
        Classification::Absent => text.white().on_bright_black(),
    }
}

/// A guess rendered as colored tiles
#[must_use]
pub fn feedback_row(guess: &Word, feedback: &Feedback) -> String {
    guess
        .text()
        .chars()
        .zip(feedback.iter())
        .map(|(letter, classification)| tile(letter, classification).to_string())
        .collect()
}

/// A guess followed by its emoji feedback, e.g. `CRANE 🟩🟨⬜⬜🟩`
#[must_use]
pub fn emoji_row(guess: &Word, feedback: &Feedback) -> String {
    format!("{} {}", guess.text().to_uppercase(), feedback.to_emoji())
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_row_pairs_word_and_feedback() {
        let guess = Word::new("trace").unwrap();
        let feedback = Feedback::evaluate(&guess, &Word::new("crane").unwrap());
        assert_eq!(emoji_row(&guess, &feedback), "TRACE ⬜🟩🟩🟨🟩");
    }

    #[test]
    fn feedback_row_contains_every_letter() {
        let guess = Word::new("crane").unwrap();
        let feedback = Feedback::evaluate(&guess, &guess);
        let row = feedback_row(&guess, &feedback);
        for letter in ["C", "R", "A", "N", "E"] {
            assert!(row.contains(letter));
        }
    }

    #[test]
    fn progress_bar_empty() {
        assert_eq!(create_progress_bar(0.0, 100.0, 10), "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        assert_eq!(create_progress_bar(100.0, 100.0, 10), "██████████");
    }

    #[test]
    fn progress_bar_half() {
        assert_eq!(create_progress_bar(50.0, 100.0, 10), "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}

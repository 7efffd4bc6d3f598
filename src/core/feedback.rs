//! Wordle feedback calculation and representation
//!
//! Feedback holds one `Classification` per letter of a guess:
//! - `Exact`: right letter, right position (green)
//! - `Present`: letter in the target, wrong position (yellow)
//! - `Absent`: letter not in the target, or already used up (gray)

use super::Word;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Verdict for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Exact,
    Present,
    Absent,
}

impl Classification {
    /// Emoji tile for this classification
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Single-letter code: `G`, `Y` or `-`
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }

    const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Exact),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Feedback for one guess, index-aligned with the guessed word
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback(Vec<Classification>);

impl Feedback {
    /// Score `guess` against `target`
    ///
    /// This implements Wordle's exact feedback rules, including proper handling
    /// of duplicate letters: a letter is never marked `Exact` or `Present` more
    /// often than it occurs in the target, and `Exact` takes priority.
    ///
    /// # Algorithm
    /// 1. First pass: Mark all exact matches and remove them from the available pool
    /// 2. Second pass: Left to right, mark `Present` while the pool still holds the letter
    ///
    /// Both words must have the same length.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::{Classification::*, Feedback, Word};
    ///
    /// let guess = Word::new("robot").unwrap();
    /// let target = Word::new("floor").unwrap();
    /// let feedback = Feedback::evaluate(&guess, &target);
    ///
    /// assert_eq!(feedback.as_slice(), &[Present, Present, Absent, Exact, Absent]);
    /// ```
    #[must_use]
    pub fn evaluate(guess: &Word, target: &Word) -> Self {
        debug_assert_eq!(guess.length(), target.length(), "length mismatch");

        let mut result = vec![Classification::Absent; guess.bytes().len()];
        let mut target_available = target.char_counts();

        // First pass: exact position matches
        for (i, (&letter, &expected)) in guess.bytes().iter().zip(target.bytes()).enumerate() {
            if letter == expected {
                result[i] = Classification::Exact;

                if let Some(count) = target_available.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: wrong position, but letter still available
        for (i, &letter) in guess.bytes().iter().enumerate() {
            if result[i] == Classification::Exact {
                continue;
            }
            if let Some(count) = target_available.get_mut(&letter)
                && *count > 0
            {
                result[i] = Classification::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Per-position classifications
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Classification] {
        &self.0
    }

    /// Iterate over the classifications in order
    pub fn iter(&self) -> impl Iterator<Item = Classification> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if every letter is `Exact`
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&c| c == Classification::Exact)
    }

    /// Count the letters with the given classification
    #[must_use]
    pub fn count(&self, classification: Classification) -> usize {
        self.0.iter().filter(|&&c| c == classification).count()
    }

    /// Parse feedback from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for exact
    /// - 'Y'/'y'/🟨 for present
    /// - '-'/'_'/⬜ for absent
    ///
    /// Returns `None` for unknown symbols or an unsupported length.
    ///
    /// # Examples
    /// ```
    /// use wordle_engine::core::Feedback;
    ///
    /// let f1 = Feedback::from_str("GY-GY").unwrap();
    /// let f2 = Feedback::from_str("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(f1, f2);
    /// ```
    #[must_use]
    #[allow(clippy::should_implement_trait)] // Provides ergonomic Option API; FromStr trait also implemented below
    pub fn from_str(s: &str) -> Option<Self> {
        let classifications: Option<Vec<Classification>> =
            s.trim().chars().map(Classification::from_char).collect();
        let classifications = classifications?;

        if !(5..=8).contains(&classifications.len()) {
            return None;
        }

        Some(Self(classifications))
    }

    /// Convert feedback to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|c| c.emoji()).collect()
    }
}

impl Index<usize> for Feedback {
    type Output = Classification;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl std::str::FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid feedback string: {s}"))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for classification in &self.0 {
            write!(f, "{}", classification.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Classification::{Absent, Exact, Present};
    use super::*;

    fn evaluate(guess: &str, target: &str) -> Feedback {
        Feedback::evaluate(&Word::new(guess).unwrap(), &Word::new(target).unwrap())
    }

    #[test]
    fn feedback_all_exact_when_guess_equals_target() {
        for word in ["crane", "speed", "aaaaa", "banana", "journey", "mountain"] {
            let feedback = evaluate(word, word);
            assert!(feedback.is_solved());
            assert_eq!(feedback.count(Exact), word.len());
        }
    }

    #[test]
    fn feedback_all_absent_for_disjoint_letters() {
        let feedback = evaluate("abcde", "fghij");
        assert_eq!(feedback.count(Absent), 5);
        assert!(!feedback.is_solved());
    }

    #[test]
    fn feedback_duplicate_letters_never_overcount() {
        // SPEED vs ERASE: both words hold two E's
        let feedback = evaluate("speed", "erase");
        assert_eq!(feedback.as_slice(), &[Present, Absent, Present, Present, Absent]);

        let guess = Word::new("speed").unwrap();
        let marked_e = guess
            .bytes()
            .iter()
            .zip(feedback.iter())
            .filter(|&(&letter, c)| letter == b'e' && c != Absent)
            .count();
        assert!(marked_e <= 2);
    }

    #[test]
    fn feedback_extra_duplicate_in_guess_is_absent() {
        // EERIE vs ERASE: three E's guessed, only two in the target
        let feedback = evaluate("eerie", "erase");
        assert_eq!(feedback.as_slice(), &[Exact, Absent, Present, Absent, Exact]);
    }

    #[test]
    fn feedback_exact_takes_priority_over_present() {
        // ROBOT vs FLOOR: second O is exact, first O is present
        let feedback = evaluate("robot", "floor");
        assert_eq!(feedback.as_slice(), &[Present, Present, Absent, Exact, Absent]);

        // Later exact matches use up both L's before the leading L is scored
        let feedback = evaluate("lolly", "hello");
        assert_eq!(feedback.as_slice(), &[Absent, Present, Exact, Exact, Absent]);
    }

    #[test]
    fn feedback_crane_trace() {
        let feedback = evaluate("trace", "crane");
        assert_eq!(feedback.as_slice(), &[Absent, Exact, Exact, Present, Exact]);

        // Every letter of TRACE except T occurs exactly once in CRANE
        assert_eq!(feedback.count(Absent), 1);
        assert_eq!(feedback.count(Exact) + feedback.count(Present), 4);
    }

    #[test]
    fn feedback_longer_words() {
        let feedback = evaluate("elephant", "festival");
        // e l e p h a n t  vs  f e s t i v a l
        assert_eq!(
            feedback.as_slice(),
            &[Present, Present, Absent, Absent, Absent, Present, Absent, Present]
        );
    }

    #[test]
    fn feedback_from_str_valid() {
        let f1 = Feedback::from_str("GYG--").unwrap();
        let f2 = Feedback::from_str("🟩🟨🟩⬜⬜").unwrap();
        let f3 = Feedback::from_str("gyg__").unwrap();

        assert_eq!(f1, f2);
        assert_eq!(f1, f3);
        assert_eq!(f1.as_slice(), &[Exact, Present, Exact, Absent, Absent]);
    }

    #[test]
    fn feedback_from_str_invalid() {
        assert!(Feedback::from_str("GYG").is_none()); // Too short
        assert!(Feedback::from_str("GYGGYGYGY").is_none()); // Too long
        assert!(Feedback::from_str("GXGGY").is_none()); // Invalid char
        assert!(Feedback::from_str("").is_none());
    }

    #[test]
    fn feedback_display_and_emoji() {
        let feedback = evaluate("speed", "erase");
        assert_eq!(feedback.to_string(), "Y-YY-");
        assert_eq!(feedback.to_emoji(), "🟨⬜🟨🟨⬜");
        assert_eq!(feedback[0], Present);
    }

    #[test]
    fn feedback_serializes_as_tagged_strings() {
        let feedback = evaluate("trace", "crane");
        let json = serde_json::to_string(&feedback).unwrap();
        assert_eq!(
            json,
            r#"["ABSENT","EXACT","EXACT","PRESENT","EXACT"]"#
        );
    }
}

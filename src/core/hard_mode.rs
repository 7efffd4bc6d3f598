//! Hard mode guess restrictions
//!
//! In hard mode a new guess is checked against the immediately preceding guess
//! and its feedback. Only that one turn is consulted, never the full history.

use super::{Classification, Feedback, Word};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which hard mode rule to enforce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardModeRule {
    /// Letters marked `Exact` must stay in place
    #[default]
    ExactPositions,
    /// Additionally, letters marked `Present` must be reused somewhere
    Strict,
}

impl FromStr for HardModeRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" | "exact-positions" => Ok(Self::ExactPositions),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown hard mode rule '{other}' (expected exact or strict)")),
        }
    }
}

impl fmt::Display for HardModeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactPositions => write!(f, "exact"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// A single constraint the candidate guess failed to meet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// `letter` must appear at `position` (0-based)
    Position { position: usize, letter: char },
    /// `letter` must appear at least `count` times
    Contains { letter: char, count: usize },
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position { position, letter } => write!(
                f,
                "letter {} must be {}",
                position + 1,
                letter.to_ascii_uppercase()
            ),
            Self::Contains { letter, count: 1 } => {
                write!(f, "guess must contain {}", letter.to_ascii_uppercase())
            }
            Self::Contains { letter, count } => write!(
                f,
                "guess must contain {} at least {count} times",
                letter.to_ascii_uppercase()
            ),
        }
    }
}

/// Candidate guess contradicts what the previous guess revealed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hard mode: {}", describe(.unmet))]
pub struct HardModeViolation {
    unmet: Vec<Requirement>,
}

impl HardModeViolation {
    /// Every requirement the guess failed, positional ones first
    #[must_use]
    pub fn unmet(&self) -> &[Requirement] {
        &self.unmet
    }

    /// Positions (0-based) whose confirmed letter was changed
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.unmet.iter().filter_map(|r| match r {
            Requirement::Position { position, .. } => Some(*position),
            Requirement::Contains { .. } => None,
        })
    }
}

fn describe(unmet: &[Requirement]) -> String {
    unmet
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check `candidate` against the previous turn, pinning `Exact` letters only
///
/// Every position marked `Exact` in `previous_feedback` must hold the same
/// letter in `candidate`. `Present` letters are not re-checked.
///
/// # Errors
/// Returns `HardModeViolation` listing every changed position.
///
/// # Examples
/// ```
/// use wordle_engine::core::{hard_mode, Feedback, Word};
///
/// let previous = Word::new("chimp").unwrap();
/// let feedback = Feedback::evaluate(&previous, &Word::new("chirp").unwrap());
///
/// let chomp = Word::new("chomp").unwrap();
/// let violation = hard_mode::validate(&chomp, &previous, &feedback).unwrap_err();
/// assert_eq!(violation.positions().collect::<Vec<_>>(), vec![2]);
///
/// assert!(hard_mode::validate(&Word::new("chirp").unwrap(), &previous, &feedback).is_ok());
/// ```
pub fn validate(
    candidate: &Word,
    previous_guess: &Word,
    previous_feedback: &Feedback,
) -> Result<(), HardModeViolation> {
    validate_with(
        HardModeRule::ExactPositions,
        candidate,
        previous_guess,
        previous_feedback,
    )
}

/// Check `candidate` against the previous turn under the given rule
///
/// # Errors
/// Returns `HardModeViolation` listing every unmet requirement.
pub fn validate_with(
    rule: HardModeRule,
    candidate: &Word,
    previous_guess: &Word,
    previous_feedback: &Feedback,
) -> Result<(), HardModeViolation> {
    let mut unmet: Vec<Requirement> = previous_guess
        .bytes()
        .iter()
        .zip(previous_feedback.iter())
        .enumerate()
        .filter(|&(position, (&letter, classification))| {
            classification == Classification::Exact && candidate.bytes().get(position) != Some(&letter)
        })
        .map(|(position, (&letter, _))| Requirement::Position {
            position,
            letter: char::from(letter),
        })
        .collect();

    if rule == HardModeRule::Strict {
        unmet.extend(missing_letters(candidate, previous_guess, previous_feedback));
    }

    if unmet.is_empty() {
        Ok(())
    } else {
        Err(HardModeViolation { unmet })
    }
}

/// Letters revealed as in the target that `candidate` does not use often enough
fn missing_letters(
    candidate: &Word,
    previous_guess: &Word,
    previous_feedback: &Feedback,
) -> Vec<Requirement> {
    let mut required: FxHashMap<u8, usize> = FxHashMap::default();
    // Preserve first-seen order for stable messages
    let mut order: Vec<u8> = Vec::new();

    for (&letter, classification) in previous_guess.bytes().iter().zip(previous_feedback.iter()) {
        if classification != Classification::Absent {
            let count = required.entry(letter).or_insert(0);
            if *count == 0 {
                order.push(letter);
            }
            *count += 1;
        }
    }

    let available = candidate.char_counts();
    order
        .into_iter()
        .filter_map(|letter| {
            let needed = required[&letter];
            let present = available.get(&letter).map_or(0, |&n| usize::from(n));
            (present < needed).then(|| Requirement::Contains {
                letter: char::from(letter),
                count: needed,
            })
        })
        .collect()
}

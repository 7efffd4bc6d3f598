//! Wordle Engine
//!
//! A Wordle game engine: duplicate-aware guess scoring, an optional hard mode,
//! the `IN_PROGRESS -> WON | LOST` state machine and player statistics whose
//! update is committed atomically with the game's terminal transition.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_engine::core::{Classification, Feedback, Word};
//!
//! let guess = Word::new("speed").unwrap();
//! let target = Word::new("erase").unwrap();
//!
//! let feedback = Feedback::evaluate(&guess, &target);
//! assert_eq!(feedback.to_string(), "Y-YY-");
//! assert_eq!(feedback.count(Classification::Exact), 0);
//! ```

// Core domain types
pub mod core;

// Guess submission orchestration
pub mod engine;

// Word dictionaries
pub mod dictionary;

// Versioned record storage
pub mod storage;

// Players, current-game pointer, load/commit around the engine
pub mod service;

// Runtime settings
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

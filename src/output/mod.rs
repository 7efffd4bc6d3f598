//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_game_view, print_guess_report, print_player, print_simulation_result, print_stats,
};

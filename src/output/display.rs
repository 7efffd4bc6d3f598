//! Display functions for command results

use super::formatters::{create_progress_bar, emoji_row, feedback_row};
use crate::commands::SimulationResult;
use crate::core::{GameStatus, Player, PlayerStatistics};
use crate::service::{GameView, GuessReport};
use colored::Colorize;

/// Print a game board with every guess so far
pub fn print_game_view(view: &GameView) {
    println!("\n{}", "─".repeat(60).cyan());
    println!("Game:     {}", view.id.to_string().bright_white());
    println!(
        "Length:   {} letters{}",
        view.word_length,
        if view.hard_mode { ", hard mode" } else { "" }
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, (guess, feedback)) in view.guesses.iter().zip(&view.feedback).enumerate() {
        println!("  {}. {}", i + 1, feedback_row(guess, feedback));
    }
    if view.guesses.is_empty() {
        println!("  {}", "No guesses yet".bright_black());
    }

    println!();
    print_status(view);
}

/// Print the outcome of one guess
pub fn print_guess_report(report: &GuessReport) {
    let game = &report.game;

    match &report.feedback {
        Some(_) => {
            if let (Some(guess), Some(feedback)) = (game.guesses.last(), game.feedback.last()) {
                println!("\n  {}\n", feedback_row(guess, feedback));
            }
        }
        None => println!("\n{}", "Game already finished, guess ignored".yellow()),
    }

    print_status(game);

    if let Some(stats) = &report.stats {
        print_stats(stats);
    }
}

fn print_status(view: &GameView) {
    match view.status {
        GameStatus::InProgress => println!(
            "{} attempts remaining",
            view.attempts_remaining.to_string().bright_cyan().bold()
        ),
        GameStatus::Won => {
            println!(
                "{}",
                format!("✅ Solved in {} guesses!", view.guesses.len())
                    .green()
                    .bold()
            );
            print_history(view);
        }
        GameStatus::Lost => {
            let target = view
                .target
                .as_ref()
                .map_or_else(String::new, |t| t.text().to_uppercase());
            println!(
                "{}",
                format!("❌ Out of attempts. The word was {target}")
                    .red()
                    .bold()
            );
            print_history(view);
        }
    }
}

fn print_history(view: &GameView) {
    println!("\n  Guess history:");
    for (i, (guess, feedback)) in view.guesses.iter().zip(&view.feedback).enumerate() {
        println!(
            "    {}. {}",
            (i + 1).to_string().bright_black(),
            emoji_row(guess, feedback)
        );
    }
}

/// Print a player record
pub fn print_player(player: &Player) {
    println!("\nPlayer:       {}", player.id.to_string().bright_white().bold());
    match player.current_game {
        Some(game) => println!("Current game: {game}"),
        None => println!("Current game: {}", "none".bright_black()),
    }
    print_stats(&player.stats);
}

/// Print aggregate statistics
pub fn print_stats(stats: &PlayerStatistics) {
    let win_rate = stats.win_rate() * 100.0;

    println!("\n{}", "Statistics".bright_cyan().bold());
    println!("  Played:         {}", stats.games_played());
    println!("  Won:            {}", stats.games_won());
    println!(
        "  Win rate:       {} {win_rate:.1}%",
        create_progress_bar(win_rate, 100.0, 20).green()
    );
    println!("  Current streak: {}", stats.current_streak());
    println!("  Longest streak: {}", stats.longest_streak());
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!("{}", " SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\nPlayers:            {}", result.players);
    println!("Games:              {}", result.games);
    println!(
        "Won / lost:         {} / {}",
        result.won.to_string().green(),
        result.lost.to_string().red()
    );
    println!("Average guesses:    {:.3}", result.average_guesses);
    println!("Longest streak:     {}", result.longest_streak);
    println!("Time:               {:.2}s", result.duration.as_secs_f64());
    println!("Speed:              {:.1} games/sec", result.games_per_second);

    println!("\n{}", "Guess distribution (won games):".bright_white().bold());
    let mut guesses: Vec<_> = result.guess_distribution.keys().copied().collect();
    guesses.sort_unstable();
    let max = result
        .guess_distribution
        .values()
        .copied()
        .max()
        .unwrap_or(0);

    for count in guesses {
        let games = result.guess_distribution[&count];
        println!(
            "  {count}: {} {games}",
            create_progress_bar(games as f64, max as f64, 30).cyan()
        );
    }
}

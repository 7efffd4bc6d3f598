//! Interactive play mode
//!
//! Text-based game loop against a fresh player.

use crate::core::{GameId, PlayerId, PlayerStatistics, WordLength};
use crate::dictionary::WordDictionary;
use crate::output::display::{print_guess_report, print_stats};
use crate::service::{GameService, ServiceError};
use crate::storage::Storage;
use anyhow::Result;
use colored::Colorize;
use rand::RngCore;
use std::io::{self, BufRead, Write};

/// Options for an interactive session
#[derive(Debug, Clone, Copy)]
pub struct PlayOptions {
    pub word_length: WordLength,
    pub hard_mode: bool,
}

/// Run the interactive game loop, reading guesses from `input`
///
/// Plays games for one newly created player until the input ends or the
/// player quits, and returns that player's final statistics.
///
/// # Errors
///
/// Returns an error on I/O failure, or if the service fails for any reason
/// other than a rejected guess.
pub fn run_play<D, S, R, I>(
    service: &GameService<D, S>,
    options: PlayOptions,
    rng: &mut R,
    input: &mut I,
) -> Result<PlayerStatistics>
where
    D: WordDictionary,
    S: Storage,
    R: RngCore,
    I: BufRead,
{
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Wordle - Play Mode                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let player = service.create_player()?.id;

    loop {
        let game = service.start_game(player, options.word_length, options.hard_mode, rng)?;
        println!(
            "Guess the {}-letter word. You have {} attempts{}.",
            game.word_length,
            game.attempts_remaining,
            if game.hard_mode { " (hard mode)" } else { "" }
        );
        println!("Commands: 'quit' to exit\n");

        if !play_one_game(service, player, game.id, input)? {
            return finish(service, player);
        }

        match get_user_input(input, "Play again? (yes/no)")?
            .map(|answer| answer.to_lowercase())
            .as_deref()
        {
            Some("yes" | "y") => println!("\n🔄 New game started!\n"),
            _ => return finish(service, player),
        }
    }
}

/// Play until the game ends; `false` means the player wants to stop
fn play_one_game<D, S, I>(
    service: &GameService<D, S>,
    player: PlayerId,
    game: GameId,
    input: &mut I,
) -> Result<bool>
where
    D: WordDictionary,
    S: Storage,
    I: BufRead,
{
    loop {
        let Some(guess) = get_user_input(input, "Guess")? else {
            return Ok(false);
        };

        if matches!(guess.to_lowercase().as_str(), "quit" | "q" | "exit") {
            return Ok(false);
        }

        match service.guess(player, game, &guess) {
            Ok(report) => {
                print_guess_report(&report);
                if report.game.status.is_terminal() {
                    return Ok(true);
                }
            }
            Err(ServiceError::Guess(err)) => println!("{} {err}\n", "❌".red()),
            Err(err) => return Err(err.into()),
        }
    }
}

fn finish<D, S>(service: &GameService<D, S>, player: PlayerId) -> Result<PlayerStatistics>
where
    D: WordDictionary,
    S: Storage,
{
    let stats = service.player(player)?.stats;
    print_stats(&stats);
    println!("\n👋 Thanks for playing!\n");
    Ok(stats)
}

/// Get user input with a prompt, `None` once the input is exhausted
fn get_user_input<I: BufRead>(input: &mut I, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

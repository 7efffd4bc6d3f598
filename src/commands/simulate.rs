//! Simulated players
//!
//! Runs many bot players in parallel against one shared service. Each bot
//! guesses a random word that is consistent with all feedback seen so far, so
//! it never breaks hard mode. Afterwards the stored statistics are checked
//! against the games actually played.

use crate::core::{Feedback, GameStatus, PlayerId, PlayerStatistics, Word, WordLength};
use crate::dictionary::WordList;
use crate::service::GameService;
use crate::storage::Storage;
use anyhow::{Context, Result, bail, ensure};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Settings for a simulation run
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub players: usize,
    pub games_per_player: usize,
    pub word_length: WordLength,
    pub hard_mode: bool,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
    pub show_progress: bool,
}

/// Aggregate result of a simulation
#[derive(Debug)]
pub struct SimulationResult {
    pub players: usize,
    pub games: usize,
    pub won: usize,
    pub lost: usize,
    /// Number of guesses taken by each won game
    pub guess_distribution: FxHashMap<usize, usize>,
    pub average_guesses: f64,
    pub longest_streak: u32,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// One bot's finished games
struct PlayerRun {
    results: Vec<(GameStatus, usize)>,
    stats: PlayerStatistics,
}

/// Run `config.players` bots in parallel, each playing `config.games_per_player` games
///
/// # Errors
///
/// Returns an error if any service call fails, or if the stored statistics
/// disagree with the games the bot played.
pub fn run_simulation<S: Storage>(
    service: &GameService<WordList, S>,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    let candidates = service.dictionary().words(config.word_length);
    if candidates.is_empty() {
        bail!("no {}-letter words to play with", config.word_length);
    }

    let total_games = config.players * config.games_per_player;
    let pb = if config.show_progress {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")?
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();

    let runs: Vec<PlayerRun> = (0..config.players)
        .into_par_iter()
        .map(|index| simulate_player(service, config, candidates, index, &pb))
        .collect::<Result<_>>()?;

    pb.finish_with_message("Complete!");
    let duration = start.elapsed();

    let mut result = SimulationResult {
        players: config.players,
        games: 0,
        won: 0,
        lost: 0,
        guess_distribution: FxHashMap::default(),
        average_guesses: 0.0,
        longest_streak: 0,
        duration,
        games_per_second: 0.0,
    };

    let mut won_guesses = 0;
    for run in &runs {
        for &(status, guesses) in &run.results {
            result.games += 1;
            if status == GameStatus::Won {
                result.won += 1;
                won_guesses += guesses;
                *result.guess_distribution.entry(guesses).or_insert(0) += 1;
            } else {
                result.lost += 1;
            }
        }
        result.longest_streak = result.longest_streak.max(run.stats.longest_streak());
    }

    if result.won > 0 {
        result.average_guesses = won_guesses as f64 / result.won as f64;
    }
    if duration.as_secs_f64() > 0.0 {
        result.games_per_second = result.games as f64 / duration.as_secs_f64();
    }

    Ok(result)
}

fn simulate_player<S: Storage>(
    service: &GameService<WordList, S>,
    config: &SimulationConfig,
    candidates: &[Word],
    index: usize,
    pb: &ProgressBar,
) -> Result<PlayerRun> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_os_rng(),
    };

    let player = service.create_player()?.id;
    let mut results = Vec::with_capacity(config.games_per_player);

    for _ in 0..config.games_per_player {
        results.push(play_bot_game(service, config, candidates, player, &mut rng)?);
        pb.inc(1);
    }

    let stats = service.player(player)?.stats;
    let won = results
        .iter()
        .filter(|(status, _)| *status == GameStatus::Won)
        .count();

    ensure!(
        stats.games_played() as usize == results.len() && stats.games_won() as usize == won,
        "player {player}: stored statistics {stats:?} do not match {} games with {won} wins",
        results.len()
    );

    Ok(PlayerRun { results, stats })
}

/// Play one game to the end; returns the final status and the number of guesses
fn play_bot_game<S: Storage>(
    service: &GameService<WordList, S>,
    config: &SimulationConfig,
    candidates: &[Word],
    player: PlayerId,
    rng: &mut StdRng,
) -> Result<(GameStatus, usize)> {
    let game = service.start_game(player, config.word_length, config.hard_mode, rng)?;
    let mut history: Vec<(Word, Feedback)> = Vec::new();

    loop {
        let remaining = filter_candidates(candidates, &history);
        let guess = remaining
            .choose(rng)
            .copied()
            .with_context(|| format!("no candidates left in game {}", game.id))?;

        let report = service.guess(player, game.id, guess.text())?;
        let Some(feedback) = report.feedback else {
            bail!("game {} was already decided", game.id);
        };
        history.push((guess.clone(), feedback));

        if report.game.status.is_terminal() {
            return Ok((report.game.status, history.len()));
        }
    }
}

/// Words that would have produced every observed feedback
fn filter_candidates<'a>(candidates: &'a [Word], history: &[(Word, Feedback)]) -> Vec<&'a Word> {
    candidates
        .iter()
        .filter(|&candidate| {
            history
                .iter()
                .all(|(guess, observed)| Feedback::evaluate(guess, candidate) == *observed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    fn service() -> GameService<WordList, InMemoryStorage> {
        GameService::new(
            WordList::from_words([
                "brave", "chimp", "chirp", "chomp", "crane", "crate", "grate", "irate", "slate",
                "trace",
            ]),
            InMemoryStorage::new(),
        )
    }

    fn config(players: usize, games_per_player: usize, hard_mode: bool) -> SimulationConfig {
        SimulationConfig {
            players,
            games_per_player,
            word_length: WordLength::MIN,
            hard_mode,
            seed: Some(11),
            show_progress: false,
        }
    }

    #[test]
    fn simulation_accounts_for_every_game() {
        let service = service();
        let result = run_simulation(&service, &config(4, 5, false)).unwrap();

        assert_eq!(result.players, 4);
        assert_eq!(result.games, 20);
        assert_eq!(result.won + result.lost, 20);

        let distribution_sum: usize = result.guess_distribution.values().sum();
        assert_eq!(distribution_sum, result.won);
        for &guesses in result.guess_distribution.keys() {
            assert!((1..=6).contains(&guesses));
        }
    }

    #[test]
    fn consistent_bot_never_breaks_hard_mode() {
        let service = service().with_hard_mode_rule(crate::core::HardModeRule::Strict);
        let result = run_simulation(&service, &config(3, 4, true)).unwrap();
        assert_eq!(result.games, 12);
    }

    #[test]
    fn aggregate_statistics_stay_within_bounds() {
        let service = service();
        let result = run_simulation(&service, &config(2, 3, false)).unwrap();
        assert!(result.average_guesses >= 1.0);
        assert!(result.longest_streak as usize <= 3);
    }

    #[test]
    fn empty_length_is_an_error() {
        let service = service();
        let mut config = config(1, 1, false);
        config.word_length = WordLength::MAX;
        assert!(run_simulation(&service, &config).is_err());
    }

    #[test]
    fn filter_candidates_keeps_consistent_words() {
        let words: Vec<Word> = ["crane", "crate", "slate", "trace"]
            .into_iter()
            .map(|w| Word::new(w).unwrap())
            .collect();
        let guess = Word::new("crane").unwrap();
        let feedback = Feedback::evaluate(&guess, &Word::new("crate").unwrap());

        let remaining = filter_candidates(&words, &[(guess, feedback)]);
        assert_eq!(remaining, vec![&words[1]]);
    }
}

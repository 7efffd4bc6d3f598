//! Wordle Engine - CLI
//!
//! Play Wordle in the terminal, or drive stored games one command at a time.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use wordle_engine::{
    commands::{PlayOptions, SimulationConfig, run_play, run_simulation},
    config::{Config, DEFAULT_DATA_PATH},
    core::{GameId, HardModeRule, PlayerId, WordLength},
    dictionary::WordList,
    output::{
        print_game_view, print_guess_report, print_player, print_simulation_result,
    },
    service::GameService,
    storage::{InMemoryStorage, JsonFileStorage},
};

#[derive(Parser)]
#[command(
    name = "wordle_engine",
    about = "Wordle game engine with hard mode, player statistics and a JSON game store",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON database file
    #[arg(long, global = true, env = "WORDLE_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Word list file (one word per line) replacing the built-in lists
    #[arg(short = 'w', long, global = true, env = "WORDLE_WORDS")]
    words: Option<PathBuf>,

    /// Hard mode rule: exact (keep green letters) or strict (also reuse yellow letters)
    #[arg(long, global = true, env = "WORDLE_HARD_MODE_RULE", default_value = "exact")]
    hard_mode_rule: HardModeRule,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive game in the terminal (default, nothing is saved)
    Play {
        /// Word length (5-8)
        #[arg(short, long, default_value = "5")]
        length: WordLength,

        /// Enable hard mode
        #[arg(long)]
        hard: bool,
    },

    /// Create or inspect players
    Player {
        #[command(subcommand)]
        command: PlayerCommands,
    },

    /// Start a new game for a player
    New {
        player: PlayerId,

        /// Word length (5-8)
        #[arg(short, long, default_value = "5")]
        length: WordLength,

        /// Enable hard mode
        #[arg(long)]
        hard: bool,
    },

    /// Submit a guess
    Guess {
        player: PlayerId,
        game: GameId,
        word: String,
    },

    /// Show a game (the player's current game if none is given)
    Show {
        player: PlayerId,
        game: Option<GameId>,
    },

    /// Delete a player's current game
    Delete { player: PlayerId, game: GameId },

    /// Run bot players in parallel against an in-memory store
    Simulate {
        /// Games per player
        #[arg(short = 'n', long, default_value = "20")]
        games: usize,

        /// Number of players
        #[arg(short, long, default_value = "8")]
        players: usize,

        /// Word length (5-8)
        #[arg(short, long, default_value = "5")]
        length: WordLength,

        /// Enable hard mode
        #[arg(long)]
        hard: bool,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum PlayerCommands {
    /// Create a player
    New,

    /// Show a player's statistics and current game
    Show { player: PlayerId },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        data_path: cli.data,
        words_path: cli.words,
        hard_mode_rule: cli.hard_mode_rule,
    };
    let json = cli.json;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play {
        length: WordLength::default(),
        hard: false,
    });

    match command {
        Commands::Play { length, hard } => run_play_command(&config, length, hard),
        Commands::Player {
            command: PlayerCommands::New,
        } => run_player_new_command(&config, json),
        Commands::Player {
            command: PlayerCommands::Show { player },
        } => run_player_show_command(&config, player, json),
        Commands::New {
            player,
            length,
            hard,
        } => run_new_command(&config, player, length, hard, json),
        Commands::Guess { player, game, word } => {
            run_guess_command(&config, player, game, &word, json)
        }
        Commands::Show { player, game } => run_show_command(&config, player, game, json),
        Commands::Delete { player, game } => run_delete_command(&config, player, game),
        Commands::Simulate {
            games,
            players,
            length,
            hard,
            seed,
        } => run_simulate_command(
            &config,
            &SimulationConfig {
                players,
                games_per_player: games,
                word_length: length,
                hard_mode: hard,
                seed,
                show_progress: !json,
            },
            json,
        ),
    }
}

/// Service over the configured dictionary and database file
fn open_service(config: &Config) -> Result<GameService<WordList, JsonFileStorage>> {
    let dictionary = config.dictionary()?;
    let storage = config.storage()?;
    Ok(GameService::new(dictionary, storage).with_hard_mode_rule(config.hard_mode_rule))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_play_command(config: &Config, length: WordLength, hard: bool) -> Result<()> {
    let service = GameService::new(config.dictionary()?, InMemoryStorage::new())
        .with_hard_mode_rule(config.hard_mode_rule);
    let options = PlayOptions {
        word_length: length,
        hard_mode: hard,
    };

    run_play(
        &service,
        options,
        &mut rand::rng(),
        &mut std::io::stdin().lock(),
    )?;
    Ok(())
}

fn run_player_new_command(config: &Config, json: bool) -> Result<()> {
    let player = open_service(config)?.create_player()?;
    if json {
        print_json(&player)
    } else {
        print_player(&player);
        Ok(())
    }
}

fn run_player_show_command(config: &Config, player: PlayerId, json: bool) -> Result<()> {
    let player = open_service(config)?.player(player)?;
    if json {
        print_json(&player)
    } else {
        print_player(&player);
        Ok(())
    }
}

fn run_new_command(
    config: &Config,
    player: PlayerId,
    length: WordLength,
    hard: bool,
    json: bool,
) -> Result<()> {
    let view = open_service(config)?.start_game(player, length, hard, &mut rand::rng())?;
    if json {
        print_json(&view)
    } else {
        print_game_view(&view);
        Ok(())
    }
}

fn run_guess_command(
    config: &Config,
    player: PlayerId,
    game: GameId,
    word: &str,
    json: bool,
) -> Result<()> {
    let report = open_service(config)?.guess(player, game, word)?;
    if json {
        print_json(&report)
    } else {
        print_guess_report(&report);
        Ok(())
    }
}

fn run_show_command(
    config: &Config,
    player: PlayerId,
    game: Option<GameId>,
    json: bool,
) -> Result<()> {
    let service = open_service(config)?;
    let view = match game {
        Some(game) => service.game(player, game)?,
        None => service.current_game(player)?,
    };

    if json {
        print_json(&view)
    } else {
        print_game_view(&view);
        Ok(())
    }
}

fn run_delete_command(config: &Config, player: PlayerId, game: GameId) -> Result<()> {
    open_service(config)?.delete_game(player, game)?;
    println!("Deleted game {game}");
    Ok(())
}

fn run_simulate_command(config: &Config, simulation: &SimulationConfig, json: bool) -> Result<()> {
    let service = GameService::new(config.dictionary()?, InMemoryStorage::new())
        .with_hard_mode_rule(config.hard_mode_rule);

    if !json {
        println!(
            "🎯 Simulating {} players x {} games...",
            simulation.players, simulation.games_per_player
        );
    }

    let result = run_simulation(&service, simulation)?;

    if json {
        print_json(&serde_json::json!({
            "players": result.players,
            "games": result.games,
            "won": result.won,
            "lost": result.lost,
            "average_guesses": result.average_guesses,
            "longest_streak": result.longest_streak,
            "seconds": result.duration.as_secs_f64(),
        }))
    } else {
        print_simulation_result(&result);
        Ok(())
    }
}

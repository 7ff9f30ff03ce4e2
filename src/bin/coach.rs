//! othello-zero command line.
//!
//! - `train`: run the self-play training loop with a tabular oracle
//! - `play`: pit a trained checkpoint against a human, random or greedy
//!   player

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use othello_zero::arena::{Arena, GreedyPolicy, HumanPolicy, RandomPolicy, SearchPolicy};
use othello_zero::games::othello::{Board, OthelloGame};
use othello_zero::mcts::SearchConfig;
use othello_zero::nn::{Oracle, TabularOracle};
use othello_zero::rules::{GameResult, RulesEngine};
use othello_zero::training::{CheckpointId, CheckpointStore, Coach, CoachConfig};
use othello_zero::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "othello-zero", about = "Self-play training for Othello")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the training loop
    Train {
        /// TOML file with coach settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Resume from this model checkpoint
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Continue without asking if the example history is missing
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Play a checkpoint against another player
    Play {
        /// Model checkpoint (defaults to best.ckpt in ./temp)
        #[arg(long)]
        checkpoint: Option<PathBuf>,

        /// Opponent
        #[arg(long, value_enum, default_value_t = Opponent::Greedy)]
        opponent: Opponent,

        /// Board side length
        #[arg(long, default_value_t = 6)]
        board_size: usize,

        /// Simulations per move for the checkpoint
        #[arg(long, default_value_t = 50)]
        simulations: u32,

        /// Games to play against random/greedy opponents
        #[arg(long, default_value_t = 2)]
        games: u32,

        /// Let the human move first
        #[arg(long)]
        human_first: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    Human,
    Random,
    Greedy,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Ask on stdin whether to continue without the example history.
fn confirm_missing(path: &Path) -> bool {
    print!("{} not found. Continue? [y|n] ", path.display());
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => line.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

fn train(config: Option<PathBuf>, resume: Option<PathBuf>, yes: bool) -> Result<()> {
    let config = match config {
        Some(path) => CoachConfig::load(&path)?,
        None => CoachConfig::default(),
    };

    let game = OthelloGame::new(config.board_size);
    let action_size = game.action_size();
    let mut coach = Coach::new(
        game,
        TabularOracle::<Board>::new(action_size),
        TabularOracle::<Board>::new(action_size),
        config,
    )?;

    if let Some(path) = resume {
        coach.resume(&path, |examples| yes || confirm_missing(examples))?;
    }

    let reports = coach.learn()?;
    let accepted = reports.iter().filter(|r| r.accepted).count();
    info!(iterations = reports.len(), accepted, "training finished");
    Ok(())
}

fn play(
    checkpoint: Option<PathBuf>,
    opponent: Opponent,
    board_size: usize,
    simulations: u32,
    games: u32,
    human_first: bool,
) -> Result<()> {
    let checkpoint = checkpoint
        .unwrap_or_else(|| CheckpointStore::new("./temp").path(CheckpointId::Best));
    let config = CoachConfig::default().with_board_size(board_size);
    config.validate()?;

    let game = OthelloGame::new(board_size);
    let mut oracle = TabularOracle::<Board>::new(game.action_size());
    oracle.load_snapshot(&checkpoint)?;
    info!(path = %checkpoint.display(), states = oracle.len(), "loaded checkpoint");

    let search_config = SearchConfig::default().with_simulations(simulations);
    let mut model = SearchPolicy::new(&game, &oracle, search_config);
    let arena = Arena::new(&game);

    match opponent {
        Opponent::Human => {
            let stdin = io::stdin();
            let mut human = HumanPolicy::new(&game, stdin.lock(), io::stdout());
            let result = if human_first {
                arena.play_game(&mut human, &mut model)?
            } else {
                arena.play_game(&mut model, &mut human)?.flipped()
            };
            let verdict = match result {
                GameResult::Win => "you win",
                GameResult::Loss => "you lose",
                GameResult::Draw => "draw",
            };
            println!("{verdict}");
        }
        Opponent::Random => {
            let mut random = RandomPolicy::new(&game, config.seed);
            let result = arena.play_match(&mut model, &mut random, games)?;
            println!(
                "model {} / random {} / draws {}",
                result.wins_a, result.wins_b, result.draws
            );
        }
        Opponent::Greedy => {
            let mut greedy = GreedyPolicy::new(&game);
            let result = arena.play_match(&mut model, &mut greedy, games)?;
            println!(
                "model {} / greedy {} / draws {}",
                result.wins_a, result.wins_b, result.draws
            );
        }
    }

    let stats = model.search().stats();
    info!(
        simulations = stats.simulations,
        oracle_calls = stats.oracle_calls,
        sims_per_sec = stats.simulations_per_second(),
        "search stats"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let outcome = match cli.command {
        Command::Train {
            config,
            resume,
            yes,
        } => train(config, resume, yes),
        Command::Play {
            checkpoint,
            opponent,
            board_size,
            simulations,
            games,
            human_first,
        } => play(
            checkpoint,
            opponent,
            board_size,
            simulations,
            games,
            human_first,
        ),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::ResumeAborted(path)) => {
            info!(path = %path.display(), "resume aborted");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "othello-zero failed");
            ExitCode::FAILURE
        }
    }
}

//! Quoridor-Rust: a Quoridor engine driven by Monte Carlo tree search.
//!
//! ## Usage
//!
//! - `quoridor-rust selfplay` - Let the AI play both sides until someone wins
//! - `quoridor-rust genmove e2 e8 d5h` - Replay the moves, print the AI's reply
//!
//! Set `RUST_LOG=debug` to see search statistics on stderr.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use quoridor_rust::constants::{DEFAULT_TIME_BUDGET_MS, MAX_ITERATIONS};
use quoridor_rust::mcts::{SearchConfig, Tree};
use quoridor_rust::position::Position;

/// Quoridor-Rust: a Quoridor MCTS engine
#[derive(Parser)]
#[command(name = "quoridor-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the AI against itself
    Selfplay {
        #[command(flatten)]
        search: SearchArgs,
        /// Stop after this many plies even without a winner
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
    /// Replay a move list from the start and print the AI's move
    Genmove {
        #[command(flatten)]
        search: SearchArgs,
        /// Moves in notation, e.g. `e2 e8 d5h`
        moves: Vec<String>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Thinking time per move, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIME_BUDGET_MS)]
    budget_ms: u64,
    /// Cap on playouts per move
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    iterations: usize,
    /// Seed for reproducible searches
    #[arg(long)]
    seed: Option<u64>,
}

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        let config = SearchConfig::default()
            .with_time_budget(Duration::from_millis(self.budget_ms))
            .with_max_iterations(self.iterations);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Selfplay { search, max_plies } => run_selfplay(&search, max_plies),
        Commands::Genmove { search, moves } => run_genmove(&search, &moves),
    }
}

fn run_selfplay(args: &SearchArgs, max_plies: usize) -> Result<()> {
    let mut pos = Position::new();
    info!(budget_ms = args.budget_ms, max_plies, "starting self-play");

    while !pos.is_game_over() && pos.ply() < max_plies {
        // Distinct seed per ply.
        let mut config = args.config();
        config.seed = config.seed.map(|seed| seed.wrapping_add(pos.ply() as u64));

        let player = pos.turn();
        let mv = Tree::new(&pos, config)
            .search()
            .with_context(|| format!("search failed at ply {}", pos.ply()))?;
        if !pos.play(mv) {
            bail!("search returned illegal move {mv} for {player}");
        }
        println!("{:>3}. {player} {mv}", pos.ply());
    }

    match pos.winner() {
        Some(winner) => println!("{winner} wins after {} plies", pos.ply()),
        None => println!("no winner after {} plies", pos.ply()),
    }
    Ok(())
}

fn run_genmove(args: &SearchArgs, moves: &[String]) -> Result<()> {
    let mut pos = Position::new();
    for (i, token) in moves.iter().enumerate() {
        let player = pos.turn();
        let played = pos
            .play_str(token)
            .with_context(|| format!("bad move #{} {token:?}", i + 1))?;
        if !played {
            bail!("illegal move #{} {token} for {player}", i + 1);
        }
    }
    if pos.is_game_over() {
        bail!("game is already over");
    }

    let mv = Tree::new(&pos, args.config())
        .search()
        .context("search failed")?;
    println!("{mv}");
    Ok(())
}

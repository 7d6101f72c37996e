//! gridlock CLI - Command-line harness for the gridlock engine
//!
//! This binary builds the engine and exposes it through a few subcommands:
//! tree statistics, a one-shot move query, an interactive game and a
//! selection throughput benchmark.

mod play;
mod render;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridlock_engine::{Board, EngineConfig, Mark, Outcome};
use gridlock_tree::initialize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// gridlock - perfect-play engine for the 3x3 line game
#[derive(Parser, Debug)]
#[command(name = "gridlock")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Seed for tie-breaking between equally good moves
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the tree and print node counts and the opening value
    Stats {
        /// Mark that moves first
        #[arg(long, default_value = "X")]
        first: Mark,
    },

    /// Print the engine's move for a board such as "XX.OO...."
    Choose {
        /// Nine cells, row by row: X, O and '.' (or E) for empty
        board: Board,

        /// Mark that moved first in this game
        #[arg(long, default_value = "X")]
        first: Mark,

        /// Mark the engine plays; defaults to the side to move
        #[arg(long)]
        bot: Option<Mark>,
    },

    /// Play against the engine in the terminal
    Play {
        /// Mark the human plays
        #[arg(long, default_value = "X")]
        human: Mark,

        /// Let the human make the opening move
        #[arg(long)]
        human_first: bool,
    },

    /// Time move selection on random reachable boards
    Bench {
        /// Number of selections to time
        #[arg(long, default_value_t = 1_000_000)]
        samples: usize,

        #[arg(long, default_value = "X")]
        first: Mark,

        #[arg(long, default_value = "O")]
        bot: Mark,
    },
}

/// Seeded RNG; a fresh seed is drawn and logged when none is given
fn make_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("{:<32}{}", "tie-break seed", seed);
    StdRng::seed_from_u64(seed)
}

fn run_stats(first: Mark) -> Result<()> {
    let start = Instant::now();
    let engine = initialize(EngineConfig::new(first, first))?;
    let elapsed = start.elapsed();
    let tree = engine.tree();

    println!("gridlock v{}", env!("CARGO_PKG_VERSION"));
    println!("First mover: {first}");
    println!();
    println!("{:<8}{:>8}", "ply", "nodes");
    for (ply, count) in tree.ply_counts().iter().enumerate() {
        println!("{ply:<8}{count:>8}");
    }
    println!("{:<8}{:>8}", "total", tree.len());
    println!();

    let terminals: Vec<Outcome> = tree
        .nodes()
        .iter()
        .filter(|node| node.is_terminal())
        .filter_map(|node| node.value())
        .collect();
    let count = |outcome: Outcome| terminals.iter().filter(|&&o| o == outcome).count();
    println!("Terminal positions: {}", terminals.len());
    println!("  {} wins: {}", Mark::X, count(Outcome::Win(Mark::X)));
    println!("  {} wins: {}", Mark::O, count(Outcome::Win(Mark::O)));
    println!("  draws:  {}", count(Outcome::Draw));
    println!();
    match engine.root_value() {
        Some(value) => println!("Opening value: {value}"),
        None => println!("Opening value: unresolved"),
    }
    println!("Build time: {elapsed:.2?}");
    Ok(())
}

fn run_choose(board: Board, first: Mark, bot: Option<Mark>, rng: &mut StdRng) -> Result<()> {
    let bot = match bot {
        Some(bot) => bot,
        None => board
            .to_move(first)
            .with_context(|| format!("no side to move on '{board}'"))?,
    };
    let engine = initialize(EngineConfig::new(first, bot))?;
    let selection = engine
        .choose(&board, rng)
        .with_context(|| format!("cannot choose a move for {bot} on '{board}'"))?;
    let after = board.place(selection.cell, bot)?;
    println!("{}", selection.cell);
    log::info!(
        "{:<32}{} ({}), value after move: {}",
        "chosen cell",
        selection.cell,
        selection.kind,
        engine.value_of(&after)?
    );
    Ok(())
}

fn run_play(human: Mark, human_first: bool, rng: &mut StdRng) -> Result<()> {
    let first = play::first_mover(human, human_first);
    let engine = initialize(EngineConfig::new(first, human.opponent()))?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        if play::play_game(&engine, &mut input, &mut out, rng)?.is_none() {
            return Ok(());
        }
        if !play::play_again(&mut input, &mut out)? {
            return Ok(());
        }
    }
}

fn run_bench(samples: usize, first: Mark, bot: Mark, rng: &mut StdRng) -> Result<()> {
    let engine = initialize(EngineConfig::new(first, bot))?;
    let boards: Vec<Board> = engine
        .tree()
        .nodes()
        .iter()
        .filter(|node| node.mover() == Some(bot))
        .map(|node| *node.board())
        .collect();
    anyhow::ensure!(!boards.is_empty(), "no positions with {bot} to move");

    println!("Running move selection benchmark...");
    println!("Sample size: {samples} selections over {} positions", boards.len());
    let start = Instant::now();
    let mut checksum = 0usize;
    for _ in 0..samples {
        let board = &boards[rng.random_range(0..boards.len())];
        checksum = checksum.wrapping_add(engine.choose_move(board, rng)?);
    }
    let elapsed = start.elapsed();
    let per_sec = samples as f64 / elapsed.as_secs_f64().max(f64::EPSILON);

    println!("Results:");
    println!("  Duration: {} ms", elapsed.as_millis());
    println!("  Throughput: {per_sec:.2} selections/sec");
    log::debug!("{:<32}{}", "checksum", checksum);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("gridlock_engine=info,gridlock_tree=info,gridlock=info"),
    )
    .init();

    let cli = Cli::parse();
    let mut rng = make_rng(cli.seed);
    match cli.command {
        Command::Stats { first } => run_stats(first),
        Command::Choose { board, first, bot } => run_choose(board, first, bot, &mut rng),
        Command::Play { human, human_first } => run_play(human, human_first, &mut rng),
        Command::Bench {
            samples,
            first,
            bot,
        } => run_bench(samples, first, bot, &mut rng),
    }
}

//! gridlock Tree Builder - Game tree construction and engine initialization
//!
//! This crate builds the complete game tree from the empty board, runs the
//! engine's evaluator over it and hands back a ready `Engine`. Building is a
//! one-shot, blocking step that must finish before the first query.

pub mod builder;

use std::time::Instant;

use gridlock_engine::evaluator::evaluate;
use gridlock_engine::{Engine, EngineConfig, GameTree, Mark, Result};

pub use builder::TreeBuilder;

/// Build and evaluate the full tree for games opened by `first_mover`
pub fn build_tree(first_mover: Mark) -> Result<GameTree> {
    let mut tree = TreeBuilder::new(first_mover).build()?;
    evaluate(&mut tree)?;
    Ok(tree)
}

/// Build the tree once and wrap it in an engine playing `config.bot_mark`
pub fn initialize(config: EngineConfig) -> Result<Engine> {
    log::info!(
        "{:<32}first={} bot={}",
        "initializing engine",
        config.first_mover,
        config.bot_mark
    );
    let start = Instant::now();
    let tree = build_tree(config.first_mover)?;
    let engine = Engine::from_tree(tree, config)?;
    log::info!(
        "{:<32}{} nodes in {:.2?}",
        "engine ready",
        engine.tree().len(),
        start.elapsed()
    );
    Ok(engine)
}

/// Same as [`initialize`] with the two marks given directly
pub fn initialize_with(first_mover: Mark, bot_mark: Mark) -> Result<Engine> {
    initialize(EngineConfig::new(first_mover, bot_mark))
}

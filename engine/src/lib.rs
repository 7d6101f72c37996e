//! gridlock Engine - Core game types, evaluation and move selection
//!
//! This crate contains the board rules, the flat ply-indexed game tree,
//! the backward-induction evaluator and the move selector. Tree
//! construction lives in `gridlock-tree`.
//!
//! The engine performs no I/O beyond `log` records and has zero UI
//! dependencies.

pub mod board;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod node;
pub mod selector;

#[cfg(test)]
mod test_tree;

pub use board::{Board, Cell, Mark};
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use node::{GameTree, Node, NodeId, Outcome};
pub use selector::{MoveKind, MoveSelector, Selection};

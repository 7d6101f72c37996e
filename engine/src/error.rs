//! Error types for the engine and tree crates

use thiserror::Error;

use crate::board::Mark;

/// Errors reported by board parsing, tree construction and move selection.
///
/// Input and query variants are caller defects. Construction variants are
/// internal defects: a tree that produced one must not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("board string has {got} cells, expected 9 in '{context}'")]
    InvalidBoardLength { got: usize, context: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid mark '{input}' (expected 'X' or 'O')")]
    InvalidMark { input: String },

    #[error("cell {cell} is out of bounds (must be 0-8)")]
    CellOutOfRange { cell: usize },

    #[error("cell {cell} is already occupied")]
    CellOccupied { cell: usize },

    #[error("board '{board}' is not reachable from the empty board")]
    UnreachableBoard { board: String },

    #[error("board '{board}' is already decided, there is no move to choose")]
    GameOver { board: String },

    #[error("board '{board}' has {found:?} to move, not the engine's mark {bot}")]
    NotBotsTurn {
        board: String,
        bot: Mark,
        found: Option<Mark>,
    },

    #[error("board '{board}' appears twice at ply {ply}")]
    DuplicateBoard { ply: usize, board: String },

    #[error("node at ply {ply} inserted after ply {current} was opened")]
    PlyOutOfOrder { ply: usize, current: usize },

    #[error("non-terminal node '{board}' has no mover")]
    MissingMover { board: String },

    #[error("node '{board}' at ply {ply} has {found} children, expected {expected}")]
    ChildCountMismatch {
        board: String,
        ply: usize,
        expected: usize,
        found: usize,
    },

    #[error("node '{board}' has two children holding the same board")]
    DuplicateSibling { board: String },

    #[error("child '{child}' does not differ from '{parent}' by exactly one placed mark")]
    InvalidTransition { parent: String, child: String },

    #[error("node '{board}' has no value after evaluation")]
    UnresolvedNode { board: String },

    #[error("node '{board}' already holds a value")]
    ValueAlreadySet { board: String },

    #[error("node id {id} does not exist")]
    UnknownNode { id: u32 },

    #[error("tree root '{board}' has {found:?} to move, expected {expected:?}")]
    FirstMoverMismatch {
        board: String,
        expected: Option<Mark>,
        found: Option<Mark>,
    },

    #[error("engine queried before its game tree was built and evaluated")]
    Uninitialized,
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

//! Engine handle: an evaluated tree plus the marks it was built for
//!
//! An `Engine` only exists around a tree that is fully built and valued, and
//! it never hands out mutable access, so queries can run from several
//! threads at once. The caller owns the random source.

use rand::Rng;

use crate::board::{Board, Mark};
use crate::error::{Error, Result};
use crate::node::{GameTree, Outcome};
use crate::selector::{MoveSelector, Selection};

/// Which mark opens the game and which mark the engine plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub first_mover: Mark,
    pub bot_mark: Mark,
}

impl EngineConfig {
    pub fn new(first_mover: Mark, bot_mark: Mark) -> Self {
        EngineConfig {
            first_mover,
            bot_mark,
        }
    }

    /// Check if the engine makes the opening move
    pub fn bot_moves_first(&self) -> bool {
        self.first_mover == self.bot_mark
    }
}

impl Default for EngineConfig {
    /// Human plays X and moves first
    fn default() -> Self {
        EngineConfig::new(Mark::X, Mark::O)
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    tree: GameTree,
    config: EngineConfig,
}

impl Engine {
    /// Wrap an evaluated tree.
    ///
    /// Fails with `Uninitialized` if the tree is empty or any node is still
    /// unvalued, and with `FirstMoverMismatch` if the tree was built for the
    /// other opening mark.
    pub fn from_tree(tree: GameTree, config: EngineConfig) -> Result<Self> {
        if !tree.is_evaluated() {
            return Err(Error::Uninitialized);
        }
        if let Some(root) = tree.root() {
            let expected = root.board().to_move(config.first_mover);
            if root.mover() != expected {
                return Err(Error::FirstMoverMismatch {
                    board: root.board().to_string(),
                    expected,
                    found: root.mover(),
                });
            }
        }
        Ok(Engine { tree, config })
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// Game value of the opening position
    pub fn root_value(&self) -> Option<Outcome> {
        self.tree.root().and_then(|root| root.value())
    }

    /// Game value of any reachable board
    pub fn value_of(&self, board: &Board) -> Result<Outcome> {
        let node = MoveSelector::new(&self.tree).locate(board)?;
        node.value().ok_or_else(|| Error::UnresolvedNode {
            board: board.to_string(),
        })
    }

    /// Choose the engine's move and report how it was classified
    pub fn choose<R: Rng>(&self, board: &Board, rng: &mut R) -> Result<Selection> {
        MoveSelector::new(&self.tree).choose(board, self.config.bot_mark, rng)
    }

    /// Choose the engine's move as a cell index in 0..=8
    pub fn choose_move<R: Rng>(&self, board: &Board, rng: &mut R) -> Result<usize> {
        self.choose(board, rng).map(|selection| selection.cell)
    }
}

//! Breadth-first construction of the complete game tree
//!
//! The builder expands one ply at a time from the empty board. Every
//! non-terminal node gets one child per empty cell, in ascending cell order.
//! A board reached through another move order at the same ply is linked to
//! the existing node instead of being created again, so each ply holds each
//! reachable board exactly once.

use gridlock_engine::board::Mark;
use gridlock_engine::node::{GameTree, Node, NodeId, Outcome, MAX_PLY};
use gridlock_engine::{Board, Result};

/// Deterministic builder for the full game tree
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    first_mover: Mark,
}

impl TreeBuilder {
    pub fn new(first_mover: Mark) -> Self {
        TreeBuilder { first_mover }
    }

    pub fn first_mover(&self) -> Mark {
        self.first_mover
    }

    /// Build every reachable position, marking terminal nodes on creation.
    ///
    /// The returned tree has been validated but not evaluated.
    pub fn build(&self) -> Result<GameTree> {
        let mut tree = GameTree::new();
        tree.insert(Node::decision(Board::new(), 0, self.first_mover, None))?;

        for ply in 0..MAX_PLY {
            let parents: Vec<(NodeId, Board, Mark)> = tree
                .ply_slice(ply)
                .iter()
                .filter_map(|node| node.mover().map(|mover| (node.id(), *node.board(), mover)))
                .collect();

            for (parent, board, mover) in parents {
                self.expand(&mut tree, parent, &board, mover, ply + 1)?;
            }
            log::debug!(
                "{:<32}{:<8}{:<8}",
                "expanded ply",
                ply + 1,
                tree.ply_slice(ply + 1).len()
            );
        }

        tree.validate()?;
        Ok(tree)
    }

    /// Create or link one child per empty cell of `board`
    fn expand(
        &self,
        tree: &mut GameTree,
        parent: NodeId,
        board: &Board,
        mover: Mark,
        ply: usize,
    ) -> Result<()> {
        for cell in board.empty_cells() {
            let next = board.place(cell, mover)?;
            let child = match tree.lookup(ply, &next) {
                Some(existing) => existing,
                None => tree.insert(child_node(next, ply, mover, parent))?,
            };
            tree.link(parent, child)?;
        }
        Ok(())
    }
}

/// Node for the position right after `mover` placed a mark.
///
/// The game ends when that mark completed a line or filled the board.
fn child_node(board: Board, ply: usize, mover: Mark, parent: NodeId) -> Node {
    if board.line_of(mover).is_some() {
        Node::terminal(board, ply, Outcome::Win(mover), Some(parent))
    } else if board.is_full() {
        Node::terminal(board, ply, Outcome::Draw, Some(parent))
    } else {
        Node::decision(board, ply, mover.opponent(), Some(parent))
    }
}

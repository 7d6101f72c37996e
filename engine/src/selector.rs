//! Move selection against an evaluated game tree
//!
//! The selector resolves a live board to its node through the per-ply index,
//! ranks the node's children by their value for the engine's mark, and
//! breaks ties among equally good children with an injected random source.

use std::fmt;

use rand::Rng;

use crate::board::{Board, Mark};
use crate::error::{Error, Result};
use crate::node::{GameTree, Node, Outcome, MAX_PLY};

/// How the chosen move relates to the game value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// The move completes a line and ends the game
    ImmediateWin,
    /// The move keeps a forced win
    Winning,
    /// No win is available; the move keeps the draw
    Drawing,
    /// Every move loses against perfect play
    Losing,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MoveKind::ImmediateWin => "immediate win",
            MoveKind::Winning => "winning",
            MoveKind::Drawing => "drawing",
            MoveKind::Losing => "losing",
        };
        f.write_str(label)
    }
}

/// A chosen cell and its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub cell: usize,
    pub kind: MoveKind,
}

/// Read-only move selector over an evaluated tree
#[derive(Debug, Clone, Copy)]
pub struct MoveSelector<'a> {
    tree: &'a GameTree,
}

impl<'a> MoveSelector<'a> {
    pub fn new(tree: &'a GameTree) -> Self {
        MoveSelector { tree }
    }

    /// Choose the move for `bot` on `board`.
    ///
    /// Priority: a child that wins on the spot, then any child valued as a
    /// win for `bot`, then any drawn child, then any child at all. Ties
    /// within the last three groups are broken uniformly with `rng`.
    pub fn choose<R: Rng>(&self, board: &Board, bot: Mark, rng: &mut R) -> Result<Selection> {
        let node = self.locate(board)?;
        match node.mover() {
            None => {
                return Err(Error::GameOver {
                    board: board.to_string(),
                })
            }
            Some(mover) if mover != bot => {
                return Err(Error::NotBotsTurn {
                    board: board.to_string(),
                    bot,
                    found: Some(mover),
                })
            }
            Some(_) => {}
        }

        let mut winning: Vec<&Node> = Vec::new();
        let mut drawing: Vec<&Node> = Vec::new();
        for &child_id in node.children() {
            let child = self.tree.node(child_id)?;
            let value = child.value().ok_or_else(|| Error::UnresolvedNode {
                board: child.board().to_string(),
            })?;
            if value.is_win_for(bot) {
                if child.is_terminal() {
                    return self.selection(node, child, MoveKind::ImmediateWin);
                }
                winning.push(child);
            } else if value == Outcome::Draw {
                drawing.push(child);
            }
        }

        let (candidates, kind) = if !winning.is_empty() {
            (winning, MoveKind::Winning)
        } else if !drawing.is_empty() {
            (drawing, MoveKind::Drawing)
        } else {
            (self.tree.children_of(node).collect(), MoveKind::Losing)
        };
        if candidates.is_empty() {
            return Err(Error::ChildCountMismatch {
                board: board.to_string(),
                ply: node.ply(),
                expected: MAX_PLY - node.ply(),
                found: 0,
            });
        }

        let pick = candidates[rng.random_range(0..candidates.len())];
        self.selection(node, pick, kind)
    }

    /// Find the node holding `board`, searching only its ply
    pub fn locate(&self, board: &Board) -> Result<&'a Node> {
        self.tree.find(board).ok_or_else(|| Error::UnreachableBoard {
            board: board.to_string(),
        })
    }

    fn selection(&self, node: &Node, child: &Node, kind: MoveKind) -> Result<Selection> {
        let cell = node
            .board()
            .diff_cell(child.board())
            .ok_or_else(|| Error::InvalidTransition {
                parent: node.board().to_string(),
                child: child.board().to_string(),
            })?;
        log::debug!("{:<32}{:<12}{:<4}{}", "selected move", node.board(), cell, kind);
        Ok(Selection { cell, kind })
    }
}

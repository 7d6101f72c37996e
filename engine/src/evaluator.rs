//! Backward induction over a fully built game tree
//!
//! Values are assigned ply by ply, deepest first. A node only reads the
//! values of its children one ply below, so all nodes of a ply are resolved
//! in parallel with Rayon against a shared `&GameTree` and the results are
//! written back afterwards.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::node::{GameTree, Node, NodeId, Outcome, MAX_PLY};

/// Value of a non-terminal node from its already-valued children.
///
/// The mover wins if any child is a win for it, otherwise draws if any child
/// is a draw, otherwise the opponent wins.
pub fn resolve(tree: &GameTree, node: &Node) -> Result<Outcome> {
    let mover = node.mover().ok_or_else(|| Error::MissingMover {
        board: node.board().to_string(),
    })?;
    if node.children().is_empty() {
        return Err(Error::ChildCountMismatch {
            board: node.board().to_string(),
            ply: node.ply(),
            expected: MAX_PLY - node.ply(),
            found: 0,
        });
    }

    let mut can_draw = false;
    for &child_id in node.children() {
        let child = tree.node(child_id)?;
        match child.value() {
            Some(outcome) if outcome.is_win_for(mover) => return Ok(outcome),
            Some(Outcome::Draw) => can_draw = true,
            Some(_) => {}
            None => {
                return Err(Error::UnresolvedNode {
                    board: child.board().to_string(),
                })
            }
        }
    }

    Ok(if can_draw {
        Outcome::Draw
    } else {
        Outcome::Win(mover.opponent())
    })
}

/// Assign a value to every non-terminal node, deepest ply first.
///
/// Terminal nodes keep the value set at creation. Fails if the tree is
/// empty, if a value would be written twice, or if any node is left
/// unresolved.
pub fn evaluate(tree: &mut GameTree) -> Result<()> {
    if tree.is_empty() {
        return Err(Error::Uninitialized);
    }

    for ply in (0..tree.depth()).rev() {
        let values: Vec<(NodeId, Outcome)> = tree
            .ply_slice(ply)
            .par_iter()
            .filter(|node| !node.is_terminal())
            .map(|node| resolve(tree, node).map(|outcome| (node.id(), outcome)))
            .collect::<Result<_>>()?;

        log::trace!("{:<32}{:<8}{:<8}", "resolved ply", ply, values.len());
        for (id, outcome) in values {
            tree.set_value(id, outcome)?;
        }
    }

    match tree.nodes().iter().find(|node| node.value().is_none()) {
        Some(node) => Err(Error::UnresolvedNode {
            board: node.board().to_string(),
        }),
        None => Ok(()),
    }
}

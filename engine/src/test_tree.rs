//! Hand-built endgame trees for evaluator and selector tests
//!
//! Each tree is rooted at a mid-game position with X moving first in the
//! game, so the whole subtree fits on a page. Nodes are inserted in ID order,
//! ply by ply, so `tree.nodes()[id]` is the node with that id.

use crate::board::{Board, Mark};
use crate::node::{GameTree, Node, NodeId, Outcome};

/// Insert a node, deriving terminal status and value from the board.
///
/// Non-terminal nodes get the mover that strict alternation from X implies.
fn push(tree: &mut GameTree, board: &str, parent: Option<NodeId>) -> NodeId {
    let board: Board = board.parse().expect("fixture board");
    let ply = board.filled_count();
    let node = match board.to_move(Mark::X) {
        Some(mover) => Node::decision(board, ply, mover, parent),
        None => {
            let outcome = board.winner().map_or(Outcome::Draw, Outcome::Win);
            Node::terminal(board, ply, outcome, parent)
        }
    };
    let id = tree.insert(node).expect("fixture insert");
    if let Some(parent) = parent {
        tree.link(parent, id).expect("fixture link");
    }
    id
}

/// X to move with two immediate wins and one quiet move.
///
/// Tree structure:
///   0: XOXOXO...  X  [6 → 1, 7 → 2, 8 → 3]
///   1: XOXOXOX..  terminal, X wins (2-4-6)
///   2: XOXOXO.X.  O  [6 → 4, 8 → 5]
///   3: XOXOXO..X  terminal, X wins (0-4-8)
///   4: XOXOXOOX.  X  [8 → 6]
///   5: XOXOXO.XO  X  [6 → 7]
///   6: XOXOXOOXX  terminal, X wins (0-4-8)
///   7: XOXOXOXXO  terminal, X wins (2-4-6)
pub fn build_win_tree() -> GameTree {
    let mut tree = GameTree::new();
    let root = push(&mut tree, "XOXOXO...", None);
    push(&mut tree, "XOXOXOX..", Some(root));
    let quiet = push(&mut tree, "XOXOXO.X.", Some(root));
    push(&mut tree, "XOXOXO..X", Some(root));
    let left = push(&mut tree, "XOXOXOOX.", Some(quiet));
    let right = push(&mut tree, "XOXOXO.XO", Some(quiet));
    push(&mut tree, "XOXOXOOXX", Some(left));
    push(&mut tree, "XOXOXOXXO", Some(right));
    tree
}

/// O to move; blocking cell 8 draws, cell 7 loses.
///
/// Tree structure:
///   0: XOXOXXO..  O  [7 → 1, 8 → 2]
///   1: XOXOXXOO.  X  [8 → 3]
///   2: XOXOXXO.O  X  [7 → 4]
///   3: XOXOXXOOX  terminal, X wins (0-4-8)
///   4: XOXOXXOXO  terminal, draw
pub fn build_draw_tree() -> GameTree {
    let mut tree = GameTree::new();
    let root = push(&mut tree, "XOXOXXO..", None);
    let open = push(&mut tree, "XOXOXXOO.", Some(root));
    let block = push(&mut tree, "XOXOXXO.O", Some(root));
    push(&mut tree, "XOXOXXOOX", Some(open));
    push(&mut tree, "XOXOXXOXO", Some(block));
    tree
}

/// O to move facing two threats; every move loses.
///
/// Tree structure:
///   0: XXOOXXO..  O  [7 → 1, 8 → 2]
///   1: XXOOXXOO.  X  [8 → 3]
///   2: XXOOXXO.O  X  [7 → 4]
///   3: XXOOXXOOX  terminal, X wins (0-4-8)
///   4: XXOOXXOXO  terminal, X wins (1-4-7)
pub fn build_loss_tree() -> GameTree {
    let mut tree = GameTree::new();
    let root = push(&mut tree, "XXOOXXO..", None);
    let left = push(&mut tree, "XXOOXXOO.", Some(root));
    let right = push(&mut tree, "XXOOXXO.O", Some(root));
    push(&mut tree, "XXOOXXOOX", Some(left));
    push(&mut tree, "XXOOXXOXO", Some(right));
    tree
}

//! Node definitions for the game tree
//!
//! This module defines the Node type that represents one position in the
//! game tree and the flat, ply-indexed `GameTree` arena that stores them.
//! Nodes refer to each other by `NodeId`; the arena owns every node.
//!
//! A board reached through different move orders is stored once per ply, so
//! child lists may share a node. The `parent` field records the node that
//! discovered it, which gives every non-root node exactly one parent.

use std::collections::HashMap;
use std::fmt;

use crate::board::{Board, Mark, CELLS};
use crate::error::{Error, Result};

/// Node ID type (index into flat array storage)
pub type NodeId = u32;

/// Deepest ply of the 3x3 game (full board)
pub const MAX_PLY: usize = CELLS;

/// Game-theoretic value of a position under perfect play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

impl Outcome {
    /// Check if this outcome is a win for `mark`
    pub fn is_win_for(self, mark: Mark) -> bool {
        self == Outcome::Win(mark)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Represents a node in the game tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node (index in flat array)
    id: NodeId,
    board: Board,
    /// Depth from the root (number of placed marks)
    ply: u8,
    /// Mark to move from this node; `None` only at terminal nodes
    mover: Option<Mark>,
    /// Parent node ID (None for root)
    parent: Option<NodeId>,
    /// Child node IDs, ascending by the cell that was filled
    children: Vec<NodeId>,
    /// Write-once game value
    value: Option<Outcome>,
}

impl Node {
    /// Create a decision node where `mover` places the next mark
    pub fn decision(board: Board, ply: usize, mover: Mark, parent: Option<NodeId>) -> Self {
        Node {
            id: 0,
            board,
            ply: ply as u8,
            mover: Some(mover),
            parent,
            children: Vec::new(),
            value: None,
        }
    }

    /// Create a terminal node whose value is fixed at creation
    pub fn terminal(board: Board, ply: usize, outcome: Outcome, parent: Option<NodeId>) -> Self {
        Node {
            id: 0,
            board,
            ply: ply as u8,
            mover: None,
            parent,
            children: Vec::new(),
            value: Some(outcome),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ply(&self) -> usize {
        self.ply as usize
    }

    pub fn mover(&self) -> Option<Mark> {
        self.mover
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn value(&self) -> Option<Outcome> {
        self.value
    }

    /// Check if this is a terminal node (no children to expand)
    pub fn is_terminal(&self) -> bool {
        self.mover.is_none()
    }
}

/// One ply of the tree: a contiguous slice of `GameTree::nodes` plus a
/// board index for lookups.
#[derive(Debug, Clone, Default)]
struct Level {
    start: usize,
    len: usize,
    index: HashMap<u16, NodeId>,
}

/// Game tree wrapper
///
/// Contains a flat array of nodes in creation order. Nodes of one ply are
/// contiguous, so the per-ply counts double as slice bounds.
#[derive(Debug, Clone, Default)]
pub struct GameTree {
    nodes: Vec<Node>,
    levels: Vec<Level>,
}

impl GameTree {
    /// Create a new empty game tree
    pub fn new() -> Self {
        GameTree::default()
    }

    /// Append a node, assigning its id.
    ///
    /// Nodes must arrive ply by ply: a node either joins the last opened ply
    /// or opens a deeper one. Skipped plies stay empty, which lets a tree be
    /// rooted at a mid-game position. A board already present at that ply is
    /// rejected.
    pub fn insert(&mut self, mut node: Node) -> Result<NodeId> {
        let ply = node.ply();
        let opened = self.levels.len();
        if ply + 1 < opened {
            return Err(Error::PlyOutOfOrder {
                ply,
                current: opened - 1,
            });
        }
        while self.levels.len() <= ply {
            self.levels.push(Level {
                start: self.nodes.len(),
                ..Level::default()
            });
        }

        let id = self.nodes.len() as NodeId;
        let level = &mut self.levels[ply];
        let key = node.board.encode();
        if level.index.contains_key(&key) {
            return Err(Error::DuplicateBoard {
                ply,
                board: node.board.to_string(),
            });
        }
        level.index.insert(key, id);
        level.len += 1;

        node.id = id;
        self.nodes.push(node);
        Ok(id)
    }

    /// Append `child` to the child list of `parent`
    pub fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.get(child).is_none() {
            return Err(Error::UnknownNode { id: child });
        }
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Record the game value of a node. Values are write-once.
    pub fn set_value(&mut self, id: NodeId, outcome: Outcome) -> Result<()> {
        let node = self.get_mut(id)?;
        if node.value.is_some() {
            return Err(Error::ValueAlreadySet {
                board: node.board.to_string(),
            });
        }
        node.value = Some(outcome);
        Ok(())
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id as usize)
            .ok_or(Error::UnknownNode { id })
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Get a node by ID, failing on an unknown id
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::UnknownNode { id })
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate over the children of a node
    pub fn children_of<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.children.iter().filter_map(move |&id| self.get(id))
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of opened plies, counting empty plies above a mid-game root
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Node count per ply (index represents the ply)
    pub fn ply_counts(&self) -> Vec<usize> {
        self.levels.iter().map(|level| level.len).collect()
    }

    /// Nodes belonging to `ply`, in creation order
    pub fn ply_slice(&self, ply: usize) -> &[Node] {
        match self.levels.get(ply) {
            Some(level) => &self.nodes[level.start..level.start + level.len],
            None => &[],
        }
    }

    /// Look up the node holding `board` at a given ply
    pub fn lookup(&self, ply: usize, board: &Board) -> Option<NodeId> {
        self.levels.get(ply)?.index.get(&board.encode()).copied()
    }

    /// Locate the node holding `board`; its ply is the number of placed marks
    pub fn find(&self, board: &Board) -> Option<&Node> {
        self.lookup(board.filled_count(), board)
            .and_then(|id| self.get(id))
    }

    /// Check that every node carries a value
    pub fn is_evaluated(&self) -> bool {
        !self.nodes.is_empty() && self.nodes.iter().all(|node| node.value.is_some())
    }

    /// Check the structural invariants of a fully built tree.
    ///
    /// Every non-terminal node at ply p has a mover and exactly `9 - p`
    /// distinct children, each one mark ahead of it. Terminal nodes have no
    /// children and are decided boards.
    pub fn validate(&self) -> Result<()> {
        for node in &self.nodes {
            let board = node.board.to_string();
            if node.is_terminal() {
                if !node.board.is_terminal() {
                    return Err(Error::MissingMover { board });
                }
                if !node.children.is_empty() {
                    return Err(Error::ChildCountMismatch {
                        board,
                        ply: node.ply(),
                        expected: 0,
                        found: node.children.len(),
                    });
                }
                continue;
            }
            if node.board.is_terminal() {
                return Err(Error::ChildCountMismatch {
                    board,
                    ply: node.ply(),
                    expected: 0,
                    found: node.children.len(),
                });
            }

            let expected = MAX_PLY - node.ply();
            if node.children.len() != expected {
                return Err(Error::ChildCountMismatch {
                    board,
                    ply: node.ply(),
                    expected,
                    found: node.children.len(),
                });
            }

            let mut seen = Vec::with_capacity(expected);
            for child in self.children_of(node) {
                if child.ply() != node.ply() + 1 || node.board.diff_cell(&child.board).is_none() {
                    return Err(Error::InvalidTransition {
                        parent: board,
                        child: child.board.to_string(),
                    });
                }
                if seen.contains(&child.board) {
                    return Err(Error::DuplicateSibling { board });
                }
                seen.push(child.board);
            }
        }
        Ok(())
    }
}

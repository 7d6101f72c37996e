//! Board value type and the rules of the 3x3 line game
//!
//! Cells are indexed row-major:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```
//!
//! A `Board` is a plain value: moves produce new boards and never mutate the
//! original.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of cells on the board
pub const CELLS: usize = 9;

/// Every line of three: rows, columns, then the two diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One of the two player marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opponent of this mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Mark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(Error::InvalidMark {
                input: other.to_string(),
            }),
        }
    }
}

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Mark),
}

impl Cell {
    /// Base-3 digit used by the canonical encoding
    fn trit(self) -> u16 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(Mark::X) => 1,
            Cell::Filled(Mark::O) => 2,
        }
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Filled(mark) => Some(mark),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(mark) => mark.to_char(),
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | ' ' | 'E' | 'e' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Filled(Mark::X)),
            'O' | 'o' | '0' => Some(Cell::Filled(Mark::O)),
            _ => None,
        }
    }
}

/// Immutable 9-cell grid
///
/// Equality and hashing are positional. `encode` gives the canonical key
/// used to index boards inside the game tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board::default()
    }

    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Get the state of one cell
    pub fn cell(&self, index: usize) -> Result<Cell> {
        self.cells
            .get(index)
            .copied()
            .ok_or(Error::CellOutOfRange { cell: index })
    }

    /// Indices of the empty cells, ascending
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Number of placed marks; equals the ply of any reachable board
    pub fn filled_count(&self) -> usize {
        CELLS - self.empty_count()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.mark() == Some(mark))
            .count()
    }

    /// Return a new board with `mark` placed in `index`
    pub fn place(&self, index: usize, mark: Mark) -> Result<Board> {
        match self.cell(index)? {
            Cell::Empty => {
                let mut cells = self.cells;
                cells[index] = Cell::Filled(mark);
                Ok(Board { cells })
            }
            Cell::Filled(_) => Err(Error::CellOccupied { cell: index }),
        }
    }

    /// First completed line of `mark`, if any
    pub fn line_of(&self, mark: Mark) -> Option<[usize; 3]> {
        let filled = Cell::Filled(mark);
        LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&i| self.cells[i] == filled))
    }

    /// First completed line of either mark, with its owner
    pub fn winning_line(&self) -> Option<(Mark, [usize; 3])> {
        LINES.iter().copied().find_map(|line| {
            let mark = self.cells[line[0]].mark()?;
            line.iter()
                .all(|&i| self.cells[i] == Cell::Filled(mark))
                .then_some((mark, line))
        })
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winning_line().map(|(mark, _)| mark)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Full board with no completed line
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winning_line().is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_full() || self.winning_line().is_some()
    }

    /// Mark to move under strict alternation starting with `first`.
    ///
    /// Returns `None` when the game is over or when the mark counts cannot
    /// arise from that alternation.
    pub fn to_move(&self, first: Mark) -> Option<Mark> {
        if self.is_terminal() {
            return None;
        }
        let (own, other) = (self.count(first), self.count(first.opponent()));
        if own == other {
            Some(first)
        } else if own == other + 1 {
            Some(first.opponent())
        } else {
            None
        }
    }

    /// The single cell that is empty here and filled in `next`.
    ///
    /// Returns `None` unless `next` is this board plus exactly one mark.
    pub fn diff_cell(&self, next: &Board) -> Option<usize> {
        let mut placed = None;
        for (index, (before, after)) in self.cells.iter().zip(next.cells.iter()).enumerate() {
            if before == after {
                continue;
            }
            if !before.is_empty() || after.is_empty() || placed.is_some() {
                return None;
            }
            placed = Some(index);
        }
        placed
    }

    /// Canonical base-3 key, cell 0 most significant
    pub fn encode(&self) -> u16 {
        self.cells
            .iter()
            .fold(0u16, |acc, cell| acc * 3 + cell.trit())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse a 9-character board such as `"XX.OO...."`.
    ///
    /// Commas, slashes and line breaks are ignored so `"XX./OO./..."` and
    /// `"X,X,E,O,O,E,E,E,E"` are accepted as well.
    fn from_str(s: &str) -> Result<Self> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !matches!(c, ',' | '/' | '\n' | '\r' | '|'))
            .collect();
        if symbols.len() != CELLS {
            return Err(Error::InvalidBoardLength {
                got: symbols.len(),
                context: s.to_string(),
            });
        }
        let mut cells = [Cell::Empty; CELLS];
        for (position, (&character, slot)) in symbols.iter().zip(cells.iter_mut()).enumerate() {
            *slot = Cell::from_char(character).ok_or_else(|| Error::InvalidCellCharacter {
                character,
                position,
                context: s.to_string(),
            })?;
        }
        Ok(Board { cells })
    }
}

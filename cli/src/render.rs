//! Text rendering of boards
//!
//! Every function draws into the writer it is given; there is no shared
//! drawing state.

use std::io::{self, Write};

use gridlock_engine::{Board, Cell};

/// Draw the 3x3 grid. Empty cells show their index so they can be typed in.
pub fn draw_board<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    for row in 0..3 {
        let symbols: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                match board.cells()[index] {
                    Cell::Empty => index.to_string(),
                    Cell::Filled(mark) => mark.to_string(),
                }
            })
            .collect();
        writeln!(out, " {} ", symbols.join(" | "))?;
        if row < 2 {
            writeln!(out, "---+---+---")?;
        }
    }
    Ok(())
}

/// Draw the final position and announce the result
pub fn draw_result<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    draw_board(out, board)?;
    match board.winning_line() {
        Some((mark, [a, b, c])) => writeln!(out, "{mark} wins along {a}-{b}-{c}"),
        None => writeln!(out, "Draw"),
    }
}

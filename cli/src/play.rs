//! Interactive human-versus-engine game on the terminal

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use gridlock_engine::{Board, Engine, Mark};
use rand::Rng;

use crate::render::{draw_board, draw_result};

/// What the human typed at the move prompt
enum Input {
    Cell(usize),
    Quit,
}

/// Read one line; `Quit` on end of input or `q`
fn read_input<R: BufRead>(input: &mut R) -> Result<Option<Input>> {
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read move")? == 0 {
        return Ok(Some(Input::Quit));
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Ok(Some(Input::Quit));
    }
    Ok(line.parse().ok().map(Input::Cell))
}

/// Play one game. Returns the final board, or `None` if the human quit.
pub fn play_game<R, W, G>(
    engine: &Engine,
    input: &mut R,
    out: &mut W,
    rng: &mut G,
) -> Result<Option<Board>>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    let config = engine.config();
    let human = config.bot_mark.opponent();
    let mut board = Board::new();
    let mut mover = config.first_mover;

    while !board.is_terminal() {
        if mover == config.bot_mark {
            let selection = engine.choose(&board, rng)?;
            board = board.place(selection.cell, mover)?;
            writeln!(out, "Engine plays {} ({})", selection.cell, selection.kind)?;
        } else {
            draw_board(out, &board)?;
            write!(out, "Your move as {human} (0-8, q to quit): ")?;
            out.flush()?;
            match read_input(input)? {
                Some(Input::Quit) => return Ok(None),
                Some(Input::Cell(cell)) => match board.place(cell, mover) {
                    Ok(next) => board = next,
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        continue;
                    }
                },
                None => {
                    writeln!(out, "Type a cell number between 0 and 8")?;
                    continue;
                }
            }
        }
        mover = mover.opponent();
    }

    draw_result(out, &board)?;
    Ok(Some(board))
}

/// Ask whether to start another game
pub fn play_again<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "Play again? [y/N]: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read answer")?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

/// Mark that opens the game given who the human is and whether they start
pub fn first_mover(human: Mark, human_first: bool) -> Mark {
    if human_first {
        human
    } else {
        human.opponent()
    }
}

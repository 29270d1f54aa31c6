//! Hot-seat play on a terminal, driving the engine directly.

use anyhow::{Context, bail};
use duel_tictactoe::{Coord, GameState, apply_move};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// Plays one game, reading `row col` lines from `input`.
///
/// Bad lines and rejected moves are reported and the same player is asked
/// again. Returns the final state once the game is won or drawn.
///
/// # Errors
///
/// Fails if `input` ends before the game does or on I/O errors.
#[instrument(skip_all)]
pub fn play_local<R: BufRead, W: Write>(mut input: R, mut output: W) -> anyhow::Result<GameState> {
    let mut state = GameState::new();
    info!("Starting local game");

    while !state.is_terminal() {
        writeln!(output, "{}\n", state.board())?;
        write!(output, "Player {}, enter row and column (0-2): ", state.active())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read move")? == 0 {
            bail!("Input ended before the game finished");
        }

        let at = match parse_coord(&line) {
            Ok(at) => at,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };

        match apply_move(&state, at) {
            Ok(next) => {
                debug!(%at, "Local move applied");
                state = next;
            }
            Err(e) => writeln!(output, "{e}")?,
        }
    }

    writeln!(output, "{}\n", state.board())?;
    match state.winner() {
        Some(symbol) => writeln!(output, "Player {symbol} wins!")?,
        None => writeln!(output, "It's a draw.")?,
    }
    info!(status = %state.status(), "Local game finished");
    Ok(state)
}

fn parse_coord(line: &str) -> Result<Coord, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [row, col] = parts.as_slice() else {
        return Err("Expected two numbers: row col".to_string());
    };
    let row: usize = row
        .parse()
        .map_err(|_| format!("'{row}' is not a row number"))?;
    let col: usize = col
        .parse()
        .map_err(|_| format!("'{col}' is not a column number"))?;
    Coord::new(row, col).map_err(|e| e.to_string())
}

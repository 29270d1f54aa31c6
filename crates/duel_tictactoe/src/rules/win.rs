//! Win detection logic for tic-tac-toe.

use crate::position::Coord;
use crate::types::{Board, Cell, Symbol};
use tracing::instrument;

/// Row-major cell indices of the eight winning lines.
const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first completed line and the symbol that fills it.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Symbol, [Coord; 3])> {
    for [a, b, c] in LINES {
        let cell = board.cell_at_index(a);
        if let Cell::Occupied(symbol) = cell
            && cell == board.cell_at_index(b)
            && cell == board.cell_at_index(c)
        {
            let line = [a, b, c].map(Coord::from_index);
            return Some((symbol, line));
        }
    }
    None
}

/// Returns the symbol with three in a row, if any.
pub fn check_winner(board: &Board) -> Option<Symbol> {
    winning_line(board).map(|(symbol, _)| symbol)
}

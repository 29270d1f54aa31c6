//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]; nothing here knows whose turn it is.

mod draw;
mod win;

pub use draw::is_draw;
pub use win::{check_winner, winning_line};

use crate::types::{Board, Status};
use tracing::{instrument, trace};

/// Derives the status of a board.
///
/// A completed line wins for the symbol filling it. Otherwise a full board
/// is a draw and anything else is still ongoing.
#[instrument(skip(board))]
pub fn evaluate_termination(board: &Board) -> Status {
    let status = if let Some(symbol) = check_winner(board) {
        Status::Won(symbol)
    } else if board.is_full() {
        Status::Draw
    } else {
        Status::Ongoing
    };
    trace!(%status, "Evaluated board");
    status
}

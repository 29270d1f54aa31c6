//! Move application.
//!
//! The engine is a set of pure functions from a state and a move to the next
//! state. It holds nothing between calls, so it can run on whatever thread
//! delivers a move.

use crate::action::MoveError;
use crate::invariants::check_state;
use crate::position::Coord;
use crate::rules::evaluate_termination;
use crate::state::GameState;
use crate::types::Cell;
use tracing::{debug, instrument};

/// Applies the active player's move at `at`, returning the next state.
///
/// The placement is evaluated before the turn passes: a completing move
/// ends the game at once, with the mover as winner. Otherwise the other
/// symbol becomes active. `state` is never modified.
///
/// # Errors
///
/// - [`MoveError::OutOfTurn`] if the game is already decided.
/// - [`MoveError::CellOccupied`] if the cell holds a mark.
#[instrument(skip(state), fields(active = %state.active()))]
pub fn apply_move(state: &GameState, at: Coord) -> Result<GameState, MoveError> {
    if state.is_terminal() {
        debug!(status = %state.status(), "Rejected move after game end");
        return Err(MoveError::OutOfTurn);
    }
    if !state.board().is_empty(at) {
        debug!("Rejected move on occupied cell");
        return Err(MoveError::CellOccupied);
    }

    let mover = state.active();
    let mut board = state.board().clone();
    board.set(at, Cell::Occupied(mover));

    let status = evaluate_termination(&board);
    let active = if status.is_terminal() {
        mover
    } else {
        mover.opponent()
    };
    let next = GameState::into_next(board, active, status);

    debug_assert!(
        check_state(&next).is_ok(),
        "apply_move produced an inconsistent state"
    );
    debug!(%status, "Move applied");
    Ok(next)
}

/// Cells the active player may play, empty once the game is decided.
pub fn legal_moves(state: &GameState) -> Vec<Coord> {
    if state.is_terminal() {
        return Vec::new();
    }
    Coord::ALL
        .into_iter()
        .filter(|at| state.board().is_empty(*at))
        .collect()
}

/// Plays `moves` in order from a fresh game.
///
/// # Errors
///
/// Returns the first [`MoveError`] encountered.
#[instrument(skip(moves), fields(count = moves.len()))]
pub fn replay(moves: &[Coord]) -> Result<GameState, MoveError> {
    moves
        .iter()
        .try_fold(GameState::new(), |state, at| apply_move(&state, *at))
}

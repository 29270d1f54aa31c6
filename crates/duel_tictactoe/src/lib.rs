//! Tic-tac-toe game engine.
//!
//! Pure state transitions for a 3x3 turn-based game: apply a move, detect a
//! win or a draw, report the current status. There is no I/O here; the
//! caller fetches the current [`GameState`], calls [`apply_move`] and
//! stores whatever comes back.
//!
//! # Example
//!
//! ```
//! use duel_tictactoe::{Coord, GameState, Status, Symbol, apply_move};
//!
//! let state = GameState::new();
//! let state = apply_move(&state, Coord::new(1, 1)?)?;
//! assert_eq!(state.active(), Symbol::O);
//! assert_eq!(state.status(), Status::Ongoing);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod invariants;
mod position;
mod rules;
mod state;
mod types;

pub use action::{CoordError, MoveError};
pub use engine::{apply_move, legal_moves, replay};
pub use invariants::{
    ActiveMatchesCounts, GameInvariants, Invariant, InvariantSet, InvariantViolation,
    MarkBalance, StatusMatchesBoard, check_state,
};
pub use position::Coord;
pub use rules::{check_winner, evaluate_termination, is_draw, winning_line};
pub use state::GameState;
pub use types::{Board, Cell, Status, Symbol};

//! Complete game state.

use crate::invariants::{InvariantViolation, check_state};
use crate::types::{Board, Status, Symbol};
use serde::{Deserialize, Serialize};

/// Board, side to move and status of one game.
///
/// Values are immutable from the outside: the engine returns a new state for
/// every accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    board: Board,
    active: Symbol,
    status: Status,
}

#[derive(Deserialize)]
struct RawGameState {
    board: Board,
    active: Symbol,
    status: Status,
}

impl TryFrom<RawGameState> for GameState {
    type Error = String;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        GameState::from_parts(raw.board, raw.active, raw.status).map_err(|violations| {
            violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}

impl GameState {
    /// Creates a fresh game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active: Symbol::X,
            status: Status::Ongoing,
        }
    }

    /// Rebuilds a state received from elsewhere, checking it is consistent.
    ///
    /// # Errors
    ///
    /// Returns the violated invariants if the parts could not come from
    /// legal alternating play.
    pub fn from_parts(
        board: Board,
        active: Symbol,
        status: Status,
    ) -> Result<Self, Vec<InvariantViolation>> {
        let state = Self {
            board,
            active,
            status,
        };
        check_state(&state)?;
        Ok(state)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The symbol to move, or the one that made the last move once the game
    /// is decided.
    pub fn active(&self) -> Symbol {
        self.active
    }

    /// Returns the game status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the winner, if the game was won.
    pub fn winner(&self) -> Option<Symbol> {
        self.status.winner()
    }

    /// Returns true once no further moves are accepted.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub(crate) fn into_next(board: Board, active: Symbol, status: Status) -> Self {
        Self {
            board,
            active,
            status,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

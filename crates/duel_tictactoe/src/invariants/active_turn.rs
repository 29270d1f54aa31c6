//! Active turn invariant: the side to move follows from the mark counts.

use super::Invariant;
use crate::state::GameState;
use crate::types::Symbol;

/// Invariant: the active symbol agrees with the board.
///
/// While the game is ongoing X is to move exactly when the counts are equal.
/// Once the game is decided the active symbol is the one that moved last.
pub struct ActiveMatchesCounts;

impl Invariant<GameState> for ActiveMatchesCounts {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Symbol::X);
        let o = state.board().count(Symbol::O);
        let next = if x == o { Symbol::X } else { Symbol::O };

        if state.is_terminal() {
            state.active() == next.opponent()
        } else {
            state.active() == next
        }
    }

    fn description() -> &'static str {
        "Active symbol matches the mark counts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Status};

    #[test]
    fn test_new_game_holds() {
        assert!(ActiveMatchesCounts::holds(&GameState::new()));
    }

    #[test]
    fn test_o_to_move_on_empty_board_violates() {
        let result = GameState::from_parts(Board::new(), Symbol::O, Status::Ongoing);
        let violations = result.expect_err("X always starts");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, ActiveMatchesCounts::description());
    }
}

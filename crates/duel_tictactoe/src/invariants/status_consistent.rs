//! Status invariant: the recorded status is the one the board implies.

use super::Invariant;
use crate::rules::evaluate_termination;
use crate::state::GameState;

/// Invariant: status equals [`evaluate_termination`] of the board, and a
/// winner is always the symbol that moved last.
pub struct StatusMatchesBoard;

impl Invariant<GameState> for StatusMatchesBoard {
    fn holds(state: &GameState) -> bool {
        if state.status() != evaluate_termination(state.board()) {
            return false;
        }
        state
            .winner()
            .is_none_or(|winner| winner == state.active())
    }

    fn description() -> &'static str {
        "Status agrees with the board"
    }
}

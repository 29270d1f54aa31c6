//! Mark balance invariant: X moves first and players alternate.

use super::Invariant;
use crate::state::GameState;
use crate::types::Symbol;

/// Invariant: the board holds as many X marks as O marks, or one more.
pub struct MarkBalance;

impl Invariant<GameState> for MarkBalance {
    fn holds(state: &GameState) -> bool {
        let x = state.board().count(Symbol::X);
        let o = state.board().count(Symbol::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X count minus O count is 0 or 1"
    }
}

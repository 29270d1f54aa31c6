//! Exhaustive walk of every position reachable by legal play.

use duel_tictactoe::{
    Coord, GameState, MoveError, Status, Symbol, apply_move, check_state, legal_moves,
};
use std::collections::HashSet;

fn reachable_states() -> HashSet<GameState> {
    let mut seen = HashSet::new();
    let mut stack = vec![GameState::new()];
    while let Some(state) = stack.pop() {
        if !seen.insert(state.clone()) {
            continue;
        }
        for at in legal_moves(&state) {
            stack.push(apply_move(&state, at).expect("legal move applies"));
        }
    }
    seen
}

#[test]
fn test_reachable_state_count() {
    assert_eq!(reachable_states().len(), 5478);
}

#[test]
fn test_every_reachable_state_is_consistent() {
    for state in reachable_states() {
        assert!(check_state(&state).is_ok(), "inconsistent: {state:?}");
    }
}

#[test]
fn test_terminal_states_reject_everything() {
    for state in reachable_states().into_iter().filter(GameState::is_terminal) {
        assert!(legal_moves(&state).is_empty());
        for at in Coord::ALL {
            assert_eq!(
                apply_move(&state, at),
                Err(MoveError::OutOfTurn),
                "move at {at} accepted after {}",
                state.status()
            );
        }
    }
}

#[test]
fn test_outcome_counts() {
    let states = reachable_states();
    let x_wins = states
        .iter()
        .filter(|s| s.status() == Status::Won(Symbol::X))
        .count();
    let o_wins = states
        .iter()
        .filter(|s| s.status() == Status::Won(Symbol::O))
        .count();
    let draws = states.iter().filter(|s| s.status() == Status::Draw).count();
    assert_eq!((x_wins, o_wins, draws), (626, 316, 16));
}

//! Shared game documents.

use crate::error::DuelError;
use crate::player::PlayerRef;
use crate::{GameId, PlayerId};
use derive_getters::Getters;
use duel_tictactoe::{Coord, GameState, Symbol, apply_move};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A game between two players, as stored and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    /// Game id, reserved by the challenge that created it.
    game_id: GameId,
    /// The challenger.
    player_x: PlayerRef,
    /// The challenged player.
    player_o: PlayerRef,
    /// Authoritative engine state.
    state: GameState,
    /// Number of accepted moves; increases by one per write.
    revision: u64,
}

impl GameRecord {
    pub(crate) fn new(game_id: GameId, player_x: PlayerRef, player_o: PlayerRef) -> Self {
        Self {
            game_id,
            player_x,
            player_o,
            state: GameState::new(),
            revision: 0,
        }
    }

    /// The symbol `player_id` plays, if they are in this game.
    pub fn symbol_of(&self, player_id: PlayerId) -> Option<Symbol> {
        if *self.player_x.id() == player_id {
            Some(Symbol::X)
        } else if *self.player_o.id() == player_id {
            Some(Symbol::O)
        } else {
            None
        }
    }

    /// Checks if it's the given player's turn.
    pub fn is_players_turn(&self, player_id: PlayerId) -> bool {
        !self.state.is_terminal() && self.symbol_of(player_id) == Some(self.state.active())
    }

    /// Both participants' ids.
    pub fn participants(&self) -> [PlayerId; 2] {
        [*self.player_x.id(), *self.player_o.id()]
    }

    /// Applies `player_id`'s move and bumps the revision.
    ///
    /// On error the record is untouched.
    #[instrument(skip(self), fields(game_id = %self.game_id, revision = self.revision))]
    pub(crate) fn make_move(&mut self, player_id: PlayerId, at: Coord) -> Result<(), DuelError> {
        let symbol = self.symbol_of(player_id).ok_or_else(|| {
            warn!(%player_id, "Unknown player attempted move");
            DuelError::NotParticipant { player_id }
        })?;

        if !self.state.is_terminal() && symbol != self.state.active() {
            warn!(
                %player_id,
                expected = %self.state.active(),
                player_symbol = %symbol,
                "Player tried to move out of turn"
            );
            return Err(DuelError::NotYourTurn {
                expected: self.state.active(),
            });
        }

        self.state = apply_move(&self.state, at).inspect_err(|e| {
            warn!(%player_id, error = %e, "Invalid move");
        })?;
        self.revision += 1;

        debug!(status = %self.state.status(), revision = self.revision, "Move recorded");
        Ok(())
    }
}

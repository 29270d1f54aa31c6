//! Error types for the duel service.

use crate::challenge::ChallengeStatus;
use crate::{ChallengeId, GameId, PlayerId};
use derive_more::{Display, Error, From};
use duel_tictactoe::{CoordError, MoveError, Symbol};

/// Everything a lobby operation can reject.
///
/// All variants are expected outcomes of bad or late requests; none of them
/// leave shared state half-updated.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum DuelError {
    /// Rejected player name.
    #[display("{reason}")]
    InvalidName {
        /// What is wrong with the name.
        reason: String,
    },

    /// The request could not be read: malformed id, body or field.
    #[display("{reason}")]
    BadRequest {
        /// What could not be read.
        reason: String,
    },

    /// Row or column off the board.
    #[display("{_0}")]
    #[from]
    InvalidCoord(CoordError),

    /// No such player.
    #[display("Player {id} not found")]
    PlayerNotFound {
        /// Requested id.
        id: PlayerId,
    },

    /// No such challenge.
    #[display("Challenge {id} not found")]
    ChallengeNotFound {
        /// Requested id.
        id: ChallengeId,
    },

    /// No such game.
    #[display("Game {id} not found")]
    GameNotFound {
        /// Requested id.
        id: GameId,
    },

    /// The player is already in an ongoing game.
    #[display("Player {id} is already in a game")]
    PlayerBusy {
        /// The busy player.
        id: PlayerId,
    },

    /// Challenger and challenged are the same player.
    #[display("A player cannot challenge themself")]
    SelfChallenge,

    /// The player has no part in the challenge or game.
    #[display("Player {player_id} is not a participant")]
    NotParticipant {
        /// Player making the request.
        player_id: PlayerId,
    },

    /// The challenge was already answered.
    #[display("Challenge {id} is already {status}")]
    ChallengeNotPending {
        /// Challenge id.
        id: ChallengeId,
        /// Its settled status.
        status: ChallengeStatus,
    },

    /// The other participant is to move.
    #[display("Not your turn. Waiting for player {expected}")]
    NotYourTurn {
        /// Symbol that is to move.
        expected: Symbol,
    },

    /// The engine refused the move.
    #[display("Invalid move: {_0}")]
    #[from]
    Move(MoveError),
}

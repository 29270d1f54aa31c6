//! Challenge documents: one player inviting another to a game.

use crate::error::DuelError;
use crate::{ChallengeId, GameId, PlayerId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a challenge stands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChallengeStatus {
    /// Waiting for the challenged player.
    Pending,
    /// Accepted; the game exists.
    Accepted,
    /// Turned down.
    Denied,
}

/// An invitation from `challenger_id` to `challenged_id`.
///
/// The game id is reserved when the challenge is sent so both sides know
/// which game document to watch once it is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Challenge {
    /// Unique id.
    challenge_id: ChallengeId,
    /// Who sent it; plays X.
    challenger_id: PlayerId,
    /// Who may answer it; plays O.
    challenged_id: PlayerId,
    /// Current status.
    status: ChallengeStatus,
    /// Game created on acceptance.
    game_id: GameId,
}

impl Challenge {
    pub(crate) fn new(challenger_id: PlayerId, challenged_id: PlayerId) -> Self {
        Self {
            challenge_id: Uuid::new_v4(),
            challenger_id,
            challenged_id,
            status: ChallengeStatus::Pending,
            game_id: Uuid::new_v4(),
        }
    }

    /// Returns true while the challenge can still be answered.
    pub fn is_pending(&self) -> bool {
        self.status == ChallengeStatus::Pending
    }

    /// Settles a pending challenge, answered by `player_id`.
    pub(crate) fn answer(
        &mut self,
        player_id: PlayerId,
        status: ChallengeStatus,
    ) -> Result<(), DuelError> {
        if player_id != self.challenged_id {
            return Err(DuelError::NotParticipant { player_id });
        }
        if !self.is_pending() {
            return Err(DuelError::ChallengeNotPending {
                id: self.challenge_id,
                status: self.status,
            });
        }
        self.status = status;
        Ok(())
    }
}

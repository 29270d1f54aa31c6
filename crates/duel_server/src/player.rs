//! Registered players.

use crate::PlayerId;
use crate::error::DuelError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A player in the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Unique id.
    id: PlayerId,
    /// Display name, trimmed.
    name: String,
    /// False while the player is in an ongoing game.
    available: bool,
}

impl Player {
    pub(crate) fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            available: true,
        }
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Short reference used inside game documents.
    pub fn to_ref(&self) -> PlayerRef {
        PlayerRef::new(self.id, self.name.clone())
    }
}

/// A participant as recorded in a game document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct PlayerRef {
    /// Player id.
    id: PlayerId,
    /// Name at the time the game started.
    name: String,
}

/// Checks a requested display name, returning it trimmed.
///
/// # Errors
///
/// Returns [`DuelError::InvalidName`] for blank names or names longer than
/// `max_len` characters.
#[instrument]
pub fn validate_name(name: &str, max_len: usize) -> Result<String, DuelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        warn!("Rejected blank player name");
        return Err(DuelError::InvalidName {
            reason: "Please enter a player name".to_string(),
        });
    }
    if trimmed.chars().count() > max_len {
        warn!(max_len, "Rejected long player name");
        return Err(DuelError::InvalidName {
            reason: format!("Player name cannot be more than {max_len} characters"),
        });
    }
    Ok(trimmed.to_string())
}

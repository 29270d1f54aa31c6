//! Lobby and live game synchronization for tic-tac-toe duels.
//!
//! Players register with a name, challenge each other, and play the
//! resulting game through a shared [`Lobby`]. Every change to a game or a
//! challenge is pushed to subscribers through a [`Subscription`], and the
//! whole lobby is served over HTTP by [`serve`].
//!
//! # Example
//!
//! ```
//! use duel_server::Lobby;
//! use duel_tictactoe::{Coord, Status, Symbol};
//!
//! let lobby = Lobby::default();
//! let ada = lobby.register_player("Ada").unwrap();
//! let bob = lobby.register_player("Bob").unwrap();
//!
//! let challenge = lobby.send_challenge(*ada.id(), *bob.id()).unwrap();
//! let game = lobby.accept_challenge(*challenge.challenge_id(), *bob.id()).unwrap();
//! let mut feed = lobby.subscribe_game(*game.game_id()).unwrap();
//!
//! lobby.make_move(*game.game_id(), *ada.id(), Coord::new(1, 1).unwrap()).unwrap();
//!
//! assert_eq!(*feed.try_next().unwrap().revision(), 0);
//! let latest = feed.try_next().unwrap();
//! assert_eq!(*latest.revision(), 1);
//! assert_eq!(latest.state().active(), Symbol::O);
//! assert_eq!(latest.state().status(), Status::Ongoing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;

mod challenge;
mod config;
mod error;
mod feed;
mod game;
mod http;
mod local;
mod lobby;
mod player;

pub use challenge::{Challenge, ChallengeStatus};
pub use config::{ConfigError, DuelConfig, LobbyConfig, ServerConfig};
pub use error::DuelError;
pub use feed::{Feed, Subscription};
pub use game::GameRecord;
pub use http::{
    AnswerRequest, ChallengeRequest, ErrorBody, MoveRequest, RegisterRequest, router, serve,
};
pub use local::play_local;
pub use lobby::Lobby;
pub use player::{Player, PlayerRef, validate_name};

/// Identifies a registered player.
pub type PlayerId = uuid::Uuid;

/// Identifies a challenge.
pub type ChallengeId = uuid::Uuid;

/// Identifies a game document.
pub type GameId = uuid::Uuid;

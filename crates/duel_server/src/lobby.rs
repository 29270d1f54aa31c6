//! The lobby: players, challenges and games, kept in sync with subscribers.
//!
//! Every mutating operation runs in one critical section over the shared
//! documents and publishes the changed documents before releasing it, so
//! subscribers see writes in the order they were accepted.

use crate::challenge::{Challenge, ChallengeStatus};
use crate::config::LobbyConfig;
use crate::error::DuelError;
use crate::feed::{Feed, Subscription};
use crate::game::GameRecord;
use crate::player::{Player, validate_name};
use crate::{ChallengeId, GameId, PlayerId};
use duel_tictactoe::Coord;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Documents {
    players: HashMap<PlayerId, Player>,
    challenges: HashMap<ChallengeId, Challenge>,
    games: HashMap<GameId, GameRecord>,
}

impl Documents {
    fn player(&self, id: PlayerId) -> Result<&Player, DuelError> {
        self.players.get(&id).ok_or_else(|| {
            debug!(%id, "Player not found");
            DuelError::PlayerNotFound { id }
        })
    }

    fn available_player(&self, id: PlayerId) -> Result<&Player, DuelError> {
        let player = self.player(id)?;
        if !*player.available() {
            warn!(%id, "Player is already in a game");
            return Err(DuelError::PlayerBusy { id });
        }
        Ok(player)
    }

    /// Flips availability, returning the players that actually changed.
    fn set_available(&mut self, ids: [PlayerId; 2], available: bool) -> Vec<Player> {
        let mut changed = Vec::new();
        for id in ids {
            if let Some(player) = self.players.get_mut(&id)
                && *player.available() != available
            {
                player.set_available(available);
                changed.push(player.clone());
            }
        }
        changed
    }

    fn reserves_game(&self, game_id: GameId) -> bool {
        self.challenges
            .values()
            .any(|c| *c.game_id() == game_id && c.is_pending())
    }

    fn sorted_players(&self) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.values().cloned().collect();
        players.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(b.id())));
        players
    }
}

/// Handle to the shared lobby. Clones share the same documents.
#[derive(Debug, Clone)]
pub struct Lobby {
    documents: Arc<Mutex<Documents>>,
    games: Feed<GameId, GameRecord>,
    challenges: Feed<PlayerId, Challenge>,
    players: Feed<(), Player>,
    config: LobbyConfig,
}

impl Lobby {
    /// Creates an empty lobby.
    #[instrument]
    pub fn new(config: LobbyConfig) -> Self {
        info!("Creating lobby");
        Self {
            documents: Arc::new(Mutex::new(Documents::default())),
            games: Feed::new(),
            challenges: Feed::new(),
            players: Feed::new(),
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Documents> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_challenge(&self, challenge: &Challenge) {
        self.challenges
            .publish(challenge.challenger_id(), challenge);
        self.challenges
            .publish(challenge.challenged_id(), challenge);
    }

    fn publish_players(&self, changed: &[Player]) {
        for player in changed {
            self.players.publish(&(), player);
        }
    }

    /// Registers a new player under a validated name.
    #[instrument(skip(self))]
    pub fn register_player(&self, name: &str) -> Result<Player, DuelError> {
        let name = validate_name(name, *self.config.max_name_len())?;
        let player = Player::new(Uuid::new_v4(), name);

        let mut documents = self.lock();
        documents.players.insert(*player.id(), player.clone());
        self.publish_players(std::slice::from_ref(&player));
        drop(documents);

        info!(player_id = %player.id(), name = %player.name(), "Player registered");
        Ok(player)
    }

    /// Returns a player by id.
    #[instrument(skip(self))]
    pub fn player(&self, id: PlayerId) -> Result<Player, DuelError> {
        self.lock().player(id).cloned()
    }

    /// All registered players, ordered by name.
    #[instrument(skip(self))]
    pub fn players(&self) -> Vec<Player> {
        let players = self.lock().sorted_players();
        debug!(count = players.len(), "Listed players");
        players
    }

    /// Sends a challenge from one player to another.
    ///
    /// Both players must be out of any ongoing game.
    #[instrument(skip(self))]
    pub fn send_challenge(
        &self,
        challenger_id: PlayerId,
        challenged_id: PlayerId,
    ) -> Result<Challenge, DuelError> {
        if challenger_id == challenged_id {
            warn!("Player tried to challenge themself");
            return Err(DuelError::SelfChallenge);
        }

        let mut documents = self.lock();
        documents.available_player(challenger_id)?;
        documents.available_player(challenged_id)?;

        let challenge = Challenge::new(challenger_id, challenged_id);
        documents
            .challenges
            .insert(*challenge.challenge_id(), challenge.clone());
        self.publish_challenge(&challenge);

        info!(
            challenge_id = %challenge.challenge_id(),
            game_id = %challenge.game_id(),
            "Challenge sent"
        );
        Ok(challenge)
    }

    /// Returns a challenge by id.
    #[instrument(skip(self))]
    pub fn challenge(&self, id: ChallengeId) -> Result<Challenge, DuelError> {
        self.lock()
            .challenges
            .get(&id)
            .cloned()
            .ok_or(DuelError::ChallengeNotFound { id })
    }

    /// Pending challenges addressed to `player_id`.
    #[instrument(skip(self))]
    pub fn pending_challenges(&self, player_id: PlayerId) -> Result<Vec<Challenge>, DuelError> {
        let documents = self.lock();
        documents.player(player_id)?;
        Ok(pending_for(&documents, player_id))
    }

    /// Accepts a pending challenge and creates its game.
    ///
    /// The challenger plays X. Both players must be out of any ongoing game
    /// and become unavailable until this one ends.
    #[instrument(skip(self))]
    pub fn accept_challenge(
        &self,
        challenge_id: ChallengeId,
        player_id: PlayerId,
    ) -> Result<GameRecord, DuelError> {
        let mut documents = self.lock();
        let mut challenge = documents
            .challenges
            .get(&challenge_id)
            .cloned()
            .ok_or(DuelError::ChallengeNotFound { id: challenge_id })?;
        challenge.answer(player_id, ChallengeStatus::Accepted)?;

        let player_x = documents
            .available_player(*challenge.challenger_id())?
            .to_ref();
        let player_o = documents
            .available_player(*challenge.challenged_id())?
            .to_ref();
        let record = GameRecord::new(*challenge.game_id(), player_x, player_o);

        documents.challenges.insert(challenge_id, challenge.clone());
        let changed = documents.set_available(record.participants(), false);
        documents.games.insert(*record.game_id(), record.clone());

        self.publish_challenge(&challenge);
        self.publish_players(&changed);
        self.games.publish(record.game_id(), &record);

        info!(game_id = %record.game_id(), "Challenge accepted, game created");
        Ok(record)
    }

    /// Turns down a pending challenge.
    #[instrument(skip(self))]
    pub fn deny_challenge(
        &self,
        challenge_id: ChallengeId,
        player_id: PlayerId,
    ) -> Result<Challenge, DuelError> {
        let mut documents = self.lock();
        let challenge = documents
            .challenges
            .get_mut(&challenge_id)
            .ok_or(DuelError::ChallengeNotFound { id: challenge_id })?;
        challenge.answer(player_id, ChallengeStatus::Denied)?;
        let challenge = challenge.clone();

        self.publish_challenge(&challenge);
        info!("Challenge denied");
        Ok(challenge)
    }

    /// Returns a game by id.
    #[instrument(skip(self))]
    pub fn game(&self, game_id: GameId) -> Result<GameRecord, DuelError> {
        self.lock()
            .games
            .get(&game_id)
            .cloned()
            .ok_or(DuelError::GameNotFound { id: game_id })
    }

    /// Plays `player_id`'s move in a game and broadcasts the new record.
    #[instrument(skip(self))]
    pub fn make_move(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        at: Coord,
    ) -> Result<GameRecord, DuelError> {
        let mut documents = self.lock();
        let record = documents
            .games
            .get_mut(&game_id)
            .ok_or(DuelError::GameNotFound { id: game_id })?;
        record.make_move(player_id, at)?;
        let record = record.clone();

        if record.state().is_terminal() {
            let changed = documents.set_available(record.participants(), true);
            self.publish_players(&changed);
            info!(status = %record.state().status(), "Game finished");
        }
        let delivered = self.games.publish(record.game_id(), &record);

        info!(
            revision = record.revision(),
            status = %record.state().status(),
            delivered,
            "Move completed successfully"
        );
        Ok(record)
    }

    /// Watches a game. The current record arrives first, then one record per
    /// accepted move.
    ///
    /// A game id reserved by a pending challenge can be watched before the
    /// game exists; the record created on acceptance is then the first value.
    #[instrument(skip(self))]
    pub fn subscribe_game(&self, game_id: GameId) -> Result<Subscription<GameRecord>, DuelError> {
        let documents = self.lock();
        match documents.games.get(&game_id) {
            Some(record) => Ok(self.games.subscribe(game_id, [record.clone()])),
            None if documents.reserves_game(game_id) => {
                debug!("Watching reserved game");
                Ok(self.games.subscribe(game_id, []))
            }
            None => Err(DuelError::GameNotFound { id: game_id }),
        }
    }

    /// Watches the player list. Every registered player arrives first, sorted
    /// by name, then each new or changed player.
    #[instrument(skip(self))]
    pub fn subscribe_players(&self) -> Subscription<Player> {
        let documents = self.lock();
        self.players.subscribe((), documents.sorted_players())
    }

    /// Watches challenges involving `player_id`: sent, received and answered.
    ///
    /// Pending challenges addressed to the player arrive first.
    #[instrument(skip(self))]
    pub fn subscribe_challenges(
        &self,
        player_id: PlayerId,
    ) -> Result<Subscription<Challenge>, DuelError> {
        let documents = self.lock();
        documents.player(player_id)?;
        let pending = pending_for(&documents, player_id);
        Ok(self.challenges.subscribe(player_id, pending))
    }
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(LobbyConfig::default())
    }
}

fn pending_for(documents: &Documents, player_id: PlayerId) -> Vec<Challenge> {
    let mut pending: Vec<Challenge> = documents
        .challenges
        .values()
        .filter(|c| *c.challenged_id() == player_id && c.is_pending())
        .cloned()
        .collect();
    pending.sort_by_key(|c| *c.challenge_id());
    pending
}

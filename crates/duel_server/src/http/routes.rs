//! Request handlers.

use crate::challenge::Challenge;
use crate::error::DuelError;
use crate::game::GameRecord;
use crate::lobby::Lobby;
use crate::player::Player;
use crate::{ChallengeId, GameId, PlayerId};
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use duel_tictactoe::Coord;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// JSON request body whose rejections are reported as [`DuelError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(DuelError))]
pub(super) struct JsonBody<T>(T);

/// Path parameter whose rejections are reported as [`DuelError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(DuelError))]
pub(super) struct Id<T>(T);

/// Body of `POST /players`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Requested display name.
    pub name: String,
}

/// Body of `POST /challenges`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequest {
    /// Sender.
    pub challenger_id: PlayerId,
    /// Recipient.
    pub challenged_id: PlayerId,
}

/// Body of `POST /challenges/{id}/accept` and `/deny`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    /// Player answering.
    pub player_id: PlayerId,
}

/// Body of `POST /games/{id}/moves`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Player moving.
    pub player_id: PlayerId,
    /// Row, 0 to 2.
    pub row: usize,
    /// Column, 0 to 2.
    pub col: usize,
}

type SseStream = Sse<KeepAliveStream<BoxStream<'static, Result<Event, axum::Error>>>>;

fn event_stream<T: Serialize + Send + 'static>(
    name: &'static str,
    updates: impl Stream<Item = T> + Send + 'static,
) -> SseStream {
    let events = updates.map(move |value| Event::default().event(name).json_data(value));
    Sse::new(events.boxed()).keep_alive(KeepAlive::default())
}

#[instrument(skip(lobby))]
pub(super) async fn register_player(
    State(lobby): State<Lobby>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<Player>), DuelError> {
    let player = lobby.register_player(&request.name)?;
    Ok((StatusCode::CREATED, Json(player)))
}

#[instrument(skip(lobby))]
pub(super) async fn list_players(State(lobby): State<Lobby>) -> Json<Vec<Player>> {
    Json(lobby.players())
}

#[instrument(skip(lobby))]
pub(super) async fn player_events(State(lobby): State<Lobby>) -> SseStream {
    let subscription = lobby.subscribe_players();
    info!("Client following players");
    event_stream("player", subscription.into_stream())
}

#[instrument(skip(lobby))]
pub(super) async fn pending_challenges(
    State(lobby): State<Lobby>,
    Id(id): Id<PlayerId>,
) -> Result<Json<Vec<Challenge>>, DuelError> {
    Ok(Json(lobby.pending_challenges(id)?))
}

#[instrument(skip(lobby))]
pub(super) async fn challenge_events(
    State(lobby): State<Lobby>,
    Id(id): Id<PlayerId>,
) -> Result<SseStream, DuelError> {
    let subscription = lobby.subscribe_challenges(id)?;
    info!("Client following challenges");
    Ok(event_stream("challenge", subscription.into_stream()))
}

#[instrument(skip(lobby))]
pub(super) async fn send_challenge(
    State(lobby): State<Lobby>,
    JsonBody(request): JsonBody<ChallengeRequest>,
) -> Result<(StatusCode, Json<Challenge>), DuelError> {
    let challenge = lobby.send_challenge(request.challenger_id, request.challenged_id)?;
    Ok((StatusCode::CREATED, Json(challenge)))
}

#[instrument(skip(lobby))]
pub(super) async fn accept_challenge(
    State(lobby): State<Lobby>,
    Id(id): Id<ChallengeId>,
    JsonBody(request): JsonBody<AnswerRequest>,
) -> Result<Json<GameRecord>, DuelError> {
    Ok(Json(lobby.accept_challenge(id, request.player_id)?))
}

#[instrument(skip(lobby))]
pub(super) async fn deny_challenge(
    State(lobby): State<Lobby>,
    Id(id): Id<ChallengeId>,
    JsonBody(request): JsonBody<AnswerRequest>,
) -> Result<Json<Challenge>, DuelError> {
    Ok(Json(lobby.deny_challenge(id, request.player_id)?))
}

#[instrument(skip(lobby))]
pub(super) async fn get_game(
    State(lobby): State<Lobby>,
    Id(id): Id<GameId>,
) -> Result<Json<GameRecord>, DuelError> {
    Ok(Json(lobby.game(id)?))
}

#[instrument(skip(lobby))]
pub(super) async fn make_move(
    State(lobby): State<Lobby>,
    Id(id): Id<GameId>,
    JsonBody(request): JsonBody<MoveRequest>,
) -> Result<Json<GameRecord>, DuelError> {
    let at = Coord::new(request.row, request.col)?;
    Ok(Json(lobby.make_move(id, request.player_id, at)?))
}

#[instrument(skip(lobby))]
pub(super) async fn game_events(
    State(lobby): State<Lobby>,
    Id(id): Id<GameId>,
) -> Result<SseStream, DuelError> {
    let subscription = lobby.subscribe_game(id)?;
    info!("Client following game");
    Ok(event_stream("game", subscription.into_stream()))
}

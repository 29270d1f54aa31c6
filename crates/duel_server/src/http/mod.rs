//! HTTP interface to the lobby.
//!
//! JSON in, JSON out. Game and challenge feeds are exposed as server-sent
//! event streams so clients can follow changes without polling.

mod error;
mod routes;

pub use error::ErrorBody;
pub use routes::{AnswerRequest, ChallengeRequest, MoveRequest, RegisterRequest};

use crate::config::ServerConfig;
use crate::lobby::Lobby;
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Builds the router over a shared lobby.
pub fn router(lobby: Lobby) -> Router {
    Router::new()
        .route(
            "/players",
            post(routes::register_player).get(routes::list_players),
        )
        .route("/players/events", get(routes::player_events))
        .route("/players/{id}/challenges", get(routes::pending_challenges))
        .route(
            "/players/{id}/challenges/events",
            get(routes::challenge_events),
        )
        .route("/challenges", post(routes::send_challenge))
        .route("/challenges/{id}/accept", post(routes::accept_challenge))
        .route("/challenges/{id}/deny", post(routes::deny_challenge))
        .route("/games/{id}", get(routes::get_game))
        .route("/games/{id}/moves", post(routes::make_move))
        .route("/games/{id}/events", get(routes::game_events))
        .with_state(lobby)
}

/// Binds the configured address and serves until Ctrl-C.
#[instrument(skip(lobby), fields(addr = %config.bind_addr()))]
pub async fn serve(config: &ServerConfig, lobby: Lobby) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(
        "Server ready at http://{}/",
        listener.local_addr()?
    );

    axum::serve(listener, router(lobby))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

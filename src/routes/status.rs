//! The game-status sync protocol polled by every client.

use axum::{Json, Router, body::Bytes, extract::State, routing::get};

use crate::{
    dto::status::{GameStatusCommandRequest, GameStatusSnapshot},
    services::status_service,
    state::SharedState,
};

/// Routes serving the shared game-status singleton.
pub fn router() -> Router<SharedState> {
    Router::new().route("/game-status", get(get_game_status).post(post_game_status))
}

/// Current shared game status.
#[utoipa::path(
    get,
    path = "/game-status",
    tag = "game-status",
    responses(
        (status = 200, description = "Current game status", body = GameStatusSnapshot)
    )
)]
pub async fn get_game_status(State(state): State<SharedState>) -> Json<GameStatusSnapshot> {
    let status = status_service::snapshot(&state).await;
    Json(GameStatusSnapshot::from_status(status, state.is_degraded()))
}

/// Apply at most one game-status command and return the resulting snapshot.
///
/// The body is parsed leniently: a malformed or empty payload carries no
/// command and the request degenerates to a read, never an error. Polling
/// admin consoles rely on this so a glitchy client cannot wedge the clock.
#[utoipa::path(
    post,
    path = "/game-status",
    tag = "game-status",
    request_body = GameStatusCommandRequest,
    responses(
        (status = 200, description = "Game status after applying the command", body = GameStatusSnapshot)
    )
)]
pub async fn post_game_status(
    State(state): State<SharedState>,
    body: Bytes,
) -> Json<GameStatusSnapshot> {
    let command = serde_json::from_slice::<GameStatusCommandRequest>(&body)
        .ok()
        .and_then(GameStatusCommandRequest::into_command);

    let status = match command {
        Some(command) => status_service::apply(&state, command).await,
        None => status_service::snapshot(&state).await,
    };

    Json(GameStatusSnapshot::from_status(status, state.is_degraded()))
}

use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::team::{LoginRequest, TeamWithTokenResponse},
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Routes issuing team tokens after registration.
pub fn router() -> Router<SharedState> {
    Router::new().route("/auth/login", post(login))
}

/// Log a team in by its registered name and issue a fresh token.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login accepted", body = TeamWithTokenResponse),
        (status = 403, description = "Team is disqualified"),
        (status = 404, description = "No team registered under that name")
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TeamWithTokenResponse>, AppError> {
    payload.validate()?;
    let response = team_service::login(&state, payload).await?;
    Ok(Json(response))
}

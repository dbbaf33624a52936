use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};

use crate::{
    dto::team::{RoundSubmitRequest, RoundSubmitResponse},
    error::AppError,
    services::{auth_service::TeamClaims, team_service},
    state::SharedState,
};

/// Routes recording round submissions.
pub fn router() -> Router<SharedState> {
    Router::new().route("/rounds/{round}/submit", post(submit_round))
}

/// Record a round result for the bearer-identified team.
#[utoipa::path(
    post,
    path = "/rounds/{round}/submit",
    tag = "rounds",
    params(("round" = String, Path, description = "Round identifier")),
    request_body = RoundSubmitRequest,
    responses(
        (status = 200, description = "Submission recorded", body = RoundSubmitResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Team is disqualified"),
        (status = 404, description = "Unknown round")
    ),
    security(("team_token" = []))
)]
pub async fn submit_round(
    State(state): State<SharedState>,
    Path(round): Path<String>,
    claims: TeamClaims,
    Json(payload): Json<RoundSubmitRequest>,
) -> Result<Json<RoundSubmitResponse>, AppError> {
    let response = team_service::submit_round(&state, &claims, round, payload).await?;
    Ok(Json(response))
}

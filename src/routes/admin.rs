use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::team::ResetGameResponse, error::AppError, services::team_service, state::SharedState,
};

/// Routes for the admin console.
pub fn router() -> Router<SharedState> {
    Router::new().route("/admin/reset-game", post(reset_game))
}

/// Reset every team's round progress and score for a fresh run.
#[utoipa::path(
    post,
    path = "/admin/reset-game",
    tag = "admin",
    responses(
        (status = 200, description = "All teams reset", body = ResetGameResponse)
    )
)]
pub async fn reset_game(
    State(state): State<SharedState>,
) -> Result<Json<ResetGameResponse>, AppError> {
    let teams_updated = team_service::reset_game(&state).await?;
    Ok(Json(ResetGameResponse { teams_updated }))
}

//! Team CRUD: registration, listing, status patches, deletion, self view.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::team::{
        AdjustScoreRequest, DeleteTeamQuery, DeleteTeamResponse, RegisterTeamRequest,
        TeamListResponse, TeamResponse, TeamWithTokenResponse, UpdateTeamStatusRequest,
    },
    error::AppError,
    services::{auth_service::TeamClaims, team_service},
    state::SharedState,
};

/// Routes managing team records.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams/register", post(register_team))
        .route("/teams", get(list_teams).delete(delete_team))
        .route("/teams/status", post(update_team_status))
        .route("/teams/score", post(adjust_team_score))
        .route("/team", get(current_team))
}

/// Register a new team and hand back its bearer token.
#[utoipa::path(
    post,
    path = "/teams/register",
    tag = "teams",
    request_body = RegisterTeamRequest,
    responses(
        (status = 201, description = "Team registered", body = TeamWithTokenResponse),
        (status = 400, description = "Invalid name or member list"),
        (status = 409, description = "Team name already taken")
    )
)]
pub async fn register_team(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterTeamRequest>,
) -> Result<(StatusCode, Json<TeamWithTokenResponse>), AppError> {
    payload.validate()?;
    let response = team_service::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Every registered team.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses((status = 200, description = "All teams", body = TeamListResponse))
)]
pub async fn list_teams(
    State(state): State<SharedState>,
) -> Result<Json<TeamListResponse>, AppError> {
    let response = team_service::list(&state).await?;
    Ok(Json(response))
}

/// Delete the team selected by the `id` query parameter.
#[utoipa::path(
    delete,
    path = "/teams",
    tag = "teams",
    params(("id" = Uuid, Query, description = "Team to delete")),
    responses(
        (status = 200, description = "Team deleted", body = DeleteTeamResponse),
        (status = 404, description = "No team with that id")
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Query(query): Query<DeleteTeamQuery>,
) -> Result<Json<DeleteTeamResponse>, AppError> {
    team_service::delete(&state, query.id).await?;
    Ok(Json(DeleteTeamResponse { success: true }))
}

/// Patch a team's winner/loser/disqualified flags.
#[utoipa::path(
    post,
    path = "/teams/status",
    tag = "teams",
    request_body = UpdateTeamStatusRequest,
    responses(
        (status = 200, description = "Updated team", body = TeamResponse),
        (status = 404, description = "No team with that id")
    )
)]
pub async fn update_team_status(
    State(state): State<SharedState>,
    Json(payload): Json<UpdateTeamStatusRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    let response = team_service::update_status(&state, payload).await?;
    Ok(Json(response))
}

/// Add a signed delta to a team's score.
#[utoipa::path(
    post,
    path = "/teams/score",
    tag = "teams",
    request_body = AdjustScoreRequest,
    responses(
        (status = 200, description = "Updated team", body = TeamResponse),
        (status = 404, description = "No team with that id")
    )
)]
pub async fn adjust_team_score(
    State(state): State<SharedState>,
    Json(payload): Json<AdjustScoreRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    let response = team_service::adjust_score(&state, payload).await?;
    Ok(Json(response))
}

/// The record of the team identified by the bearer token.
#[utoipa::path(
    get,
    path = "/team",
    tag = "teams",
    responses(
        (status = 200, description = "The caller's team", body = TeamResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("team_token" = []))
)]
pub async fn current_team(
    State(state): State<SharedState>,
    claims: TeamClaims,
) -> Result<Json<TeamResponse>, AppError> {
    let response = team_service::self_view(&state, &claims).await?;
    Ok(Json(response))
}

//! Wire representations for team registration, progress, and administration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{RoundResultEntity, TeamEntity},
    dto::{
        format_ms_timestamp,
        validation::{validate_members, validate_team_name},
    },
};

/// Payload for `POST /teams/register`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamRequest {
    /// Unique team display name.
    #[validate(custom(function = validate_team_name))]
    pub name: String,
    /// Member identifiers, at least one.
    #[validate(custom(function = validate_members))]
    pub members: Vec<String>,
}

/// Payload for `POST /auth/login`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Name the team registered under.
    #[validate(custom(function = validate_team_name))]
    pub name: String,
}

/// Partial status update for `POST /teams/status`.
///
/// Only the fields explicitly present are patched; the flags are independent
/// and not mutually exclusive at the data layer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamStatusRequest {
    /// Team to patch.
    pub team_id: Uuid,
    /// Winner flag, when provided.
    #[serde(default)]
    pub is_winner: Option<bool>,
    /// Loser flag, when provided.
    #[serde(default)]
    pub is_loser: Option<bool>,
    /// Disqualification flag, when provided.
    #[serde(default)]
    pub disqualified: Option<bool>,
}

/// Score adjustment for `POST /teams/score`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustScoreRequest {
    /// Team whose score changes.
    pub team_id: Uuid,
    /// Signed delta added to the current score.
    pub delta: i64,
}

/// Round submission payload for `POST /rounds/{round}/submit`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundSubmitRequest {
    /// Score earned in the round.
    #[serde(default)]
    pub score: i64,
    /// Attempts the team needed.
    #[serde(default)]
    pub attempts: u32,
    /// Seconds spent on the round.
    #[serde(default)]
    pub time_spent: u64,
}

/// Query selecting the team to delete.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteTeamQuery {
    /// Team primary key.
    pub id: Uuid,
}

/// Public projection of a team record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    /// Team primary key.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// Member identifiers.
    pub members: Vec<String>,
    /// Completion flag per round, in round order.
    #[schema(value_type = Object)]
    pub completed_rounds: IndexMap<String, bool>,
    /// Per-round submission details for completed rounds.
    #[schema(value_type = Object)]
    pub round_details: IndexMap<String, RoundResultSnapshot>,
    /// Accumulated score.
    pub score: i64,
    /// Admin-set disqualification flag.
    pub disqualified: bool,
    /// Admin-toggled winner flag.
    pub is_winner: bool,
    /// Admin-toggled loser flag.
    pub is_loser: bool,
    /// RFC3339 registration instant.
    pub created_at: String,
    /// RFC3339 instant of the last mutating interaction.
    pub last_active: String,
}

/// Detail of one completed round in a team projection.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundResultSnapshot {
    /// Score awarded for the round.
    pub score: i64,
    /// Attempts the team needed.
    pub attempts: u32,
    /// Seconds spent on the round.
    pub time_spent: u64,
    /// RFC3339 completion instant.
    pub completed_at: String,
}

impl From<RoundResultEntity> for RoundResultSnapshot {
    fn from(entity: RoundResultEntity) -> Self {
        Self {
            score: entity.score,
            attempts: entity.attempts,
            time_spent: entity.time_spent_secs,
            completed_at: format_ms_timestamp(entity.completed_at),
        }
    }
}

impl From<TeamEntity> for TeamSnapshot {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            members: entity.members,
            completed_rounds: entity.completed_rounds,
            round_details: entity
                .round_details
                .into_iter()
                .map(|(round, detail)| (round, detail.into()))
                .collect(),
            score: entity.score,
            disqualified: entity.disqualified,
            is_winner: entity.is_winner,
            is_loser: entity.is_loser,
            created_at: format_ms_timestamp(entity.created_at),
            last_active: format_ms_timestamp(entity.last_active),
        }
    }
}

/// Response for a successful registration or login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamWithTokenResponse {
    /// The team record.
    pub team: TeamSnapshot,
    /// Bearer token identifying the team on player-facing routes.
    pub token: String,
}

/// Response wrapping a single team record.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamResponse {
    /// The team record.
    pub team: TeamSnapshot,
}

/// Response for `GET /teams`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamListResponse {
    /// Every registered team.
    pub teams: Vec<TeamSnapshot>,
}

/// Response for `DELETE /teams`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteTeamResponse {
    /// Whether a record was removed.
    pub success: bool,
}

/// Response for a round submission.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundSubmitResponse {
    /// The updated team record.
    pub team: TeamSnapshot,
    /// Outcome for the submitted round.
    pub round: RoundOutcome,
}

/// Outcome summary for one submitted round.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundOutcome {
    /// Round identifier.
    pub id: String,
    /// Whether the round is now marked complete.
    pub completed: bool,
    /// Score awarded by this submission.
    pub score: i64,
}

/// Response for `POST /admin/reset-game`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetGameResponse {
    /// Number of team records modified.
    pub teams_updated: u64,
}

//! Team registration, progress tracking, and administration.
//!
//! Every operation goes through [`crate::state::AppState::with_store`], so a
//! dying backend degrades to the in-memory store instead of surfacing an
//! error to the caller mid-event.

use uuid::Uuid;

use crate::{
    dao::{
        hunt_store::HuntStore,
        models::{RoundResultEntity, TeamEntity},
    },
    dto::team::{
        AdjustScoreRequest, LoginRequest, RegisterTeamRequest, RoundOutcome, RoundSubmitRequest,
        RoundSubmitResponse, TeamListResponse, TeamResponse, TeamWithTokenResponse,
        UpdateTeamStatusRequest,
    },
    error::ServiceError,
    services::auth_service::{self, TeamClaims},
    state::{SharedState, game_status::now_ms},
};

/// Register a new team, enforcing name uniqueness, and issue its token.
pub async fn register(
    state: &SharedState,
    request: RegisterTeamRequest,
) -> Result<TeamWithTokenResponse, ServiceError> {
    let name = request.name.trim().to_owned();

    let existing = {
        let name = name.clone();
        state
            .with_store(move |store| store.find_team_by_name(name.clone()))
            .await?
    };
    if existing.is_some() {
        return Err(ServiceError::Conflict(format!(
            "team name `{name}` is already taken"
        )));
    }

    let team = TeamEntity::new(name, request.members, &state.config().rounds, now_ms());
    {
        let team = team.clone();
        state
            .with_store(move |store| store.insert_team(team.clone()))
            .await?;
    }

    let token = auth_service::issue_token(&state.config().jwt_secret, team.id, &team.name)?;
    Ok(TeamWithTokenResponse {
        team: team.into(),
        token,
    })
}

/// Log a registered team in by name and issue a fresh token.
pub async fn login(
    state: &SharedState,
    request: LoginRequest,
) -> Result<TeamWithTokenResponse, ServiceError> {
    let name = request.name.trim().to_owned();

    let Some(mut team) = ({
        let name = name.clone();
        state
            .with_store(move |store| store.find_team_by_name(name.clone()))
            .await?
    }) else {
        return Err(ServiceError::NotFound(format!("team `{name}` not found")));
    };

    ensure_not_disqualified(&team)?;

    team.last_active = now_ms();
    {
        let team = team.clone();
        state
            .with_store(move |store| store.save_team(team.clone()))
            .await?;
    }

    let token = auth_service::issue_token(&state.config().jwt_secret, team.id, &team.name)?;
    Ok(TeamWithTokenResponse {
        team: team.into(),
        token,
    })
}

/// The bearer-identified team's own record.
pub async fn self_view(
    state: &SharedState,
    claims: &TeamClaims,
) -> Result<TeamResponse, ServiceError> {
    let team = require_team(state, claims.sub).await?;
    Ok(TeamResponse { team: team.into() })
}

/// Every registered team, for the admin panel's periodic poll.
pub async fn list(state: &SharedState) -> Result<TeamListResponse, ServiceError> {
    let teams = state.with_store(|store| store.list_teams()).await?;
    Ok(TeamListResponse {
        teams: teams.into_iter().map(Into::into).collect(),
    })
}

/// Patch only the status flags explicitly provided, leaving others untouched.
pub async fn update_status(
    state: &SharedState,
    request: UpdateTeamStatusRequest,
) -> Result<TeamResponse, ServiceError> {
    let mut team = require_team(state, request.team_id).await?;

    if let Some(is_winner) = request.is_winner {
        team.is_winner = is_winner;
    }
    if let Some(is_loser) = request.is_loser {
        team.is_loser = is_loser;
    }
    if let Some(disqualified) = request.disqualified {
        team.disqualified = disqualified;
    }
    team.last_active = now_ms();

    {
        let team = team.clone();
        state
            .with_store(move |store| store.save_team(team.clone()))
            .await?;
    }

    Ok(TeamResponse { team: team.into() })
}

/// Add a signed delta to a team's score.
pub async fn adjust_score(
    state: &SharedState,
    request: AdjustScoreRequest,
) -> Result<TeamResponse, ServiceError> {
    let mut team = require_team(state, request.team_id).await?;
    team.score += request.delta;
    team.last_active = now_ms();

    {
        let team = team.clone();
        state
            .with_store(move |store| store.save_team(team.clone()))
            .await?;
    }

    Ok(TeamResponse { team: team.into() })
}

/// Delete a team by id.
pub async fn delete(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let removed = state
        .with_store(move |store| store.delete_team(id))
        .await?;
    if !removed {
        return Err(ServiceError::NotFound(format!("team `{id}` not found")));
    }
    Ok(())
}

/// Record a round submission for the bearer-identified team.
pub async fn submit_round(
    state: &SharedState,
    claims: &TeamClaims,
    round: String,
    submission: RoundSubmitRequest,
) -> Result<RoundSubmitResponse, ServiceError> {
    if !state.config().rounds.contains(&round) {
        return Err(ServiceError::NotFound(format!("unknown round `{round}`")));
    }

    let mut team = require_team(state, claims.sub).await?;
    ensure_not_disqualified(&team)?;

    let now = now_ms();
    team.completed_rounds.insert(round.clone(), true);
    team.score += submission.score;
    team.round_details.insert(
        round.clone(),
        RoundResultEntity {
            score: submission.score,
            attempts: submission.attempts,
            time_spent_secs: submission.time_spent,
            completed_at: now,
        },
    );
    team.last_active = now;

    {
        let team = team.clone();
        state
            .with_store(move |store| store.save_team(team.clone()))
            .await?;
    }

    Ok(RoundSubmitResponse {
        team: team.into(),
        round: RoundOutcome {
            id: round,
            completed: true,
            score: submission.score,
        },
    })
}

/// Reset every team's rounds and score; returns the modified count.
pub async fn reset_game(state: &SharedState) -> Result<u64, ServiceError> {
    let rounds = state.config().rounds.clone();
    let now = now_ms();
    state
        .with_store(move |store| store.reset_teams(rounds.clone(), now))
        .await
        .map_err(Into::into)
}

async fn require_team(state: &SharedState, id: Uuid) -> Result<TeamEntity, ServiceError> {
    state
        .with_store(move |store| store.find_team(id))
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("team `{id}` not found")))
}

fn ensure_not_disqualified(team: &TeamEntity) -> Result<(), ServiceError> {
    if team.disqualified {
        return Err(ServiceError::Forbidden(
            "your team has been disqualified from the game".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    fn register_request(name: &str) -> RegisterTeamRequest {
        RegisterTeamRequest {
            name: name.to_owned(),
            members: vec!["ada".into(), "grace".into()],
        }
    }

    async fn registered(state: &SharedState, name: &str) -> TeamWithTokenResponse {
        register(state, register_request(name)).await.unwrap()
    }

    fn claims_for(team: &TeamWithTokenResponse) -> TeamClaims {
        TeamClaims {
            sub: team.team.id,
            name: team.team.name.clone(),
            exp: u64::MAX,
        }
    }

    #[tokio::test]
    async fn registration_defaults_every_round_to_incomplete() {
        let state = AppState::new(AppConfig::default());
        let response = registered(&state, "seekers").await;

        assert_eq!(response.team.score, 0);
        assert!(!response.team.disqualified);
        assert_eq!(response.team.completed_rounds.len(), 3);
        assert!(response.team.completed_rounds.values().all(|done| !done));
        assert!(!response.token.is_empty());
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_without_creating_a_record() {
        let state = AppState::new(AppConfig::default());
        registered(&state, "seekers").await;

        let err = register(&state, register_request("seekers"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(list(&state).await.unwrap().teams.len(), 1);
    }

    #[tokio::test]
    async fn status_flags_patch_independently() {
        let state = AppState::new(AppConfig::default());
        let team = registered(&state, "seekers").await;

        update_status(
            &state,
            UpdateTeamStatusRequest {
                team_id: team.team.id,
                is_winner: Some(true),
                is_loser: None,
                disqualified: None,
            },
        )
        .await
        .unwrap();

        let updated = update_status(
            &state,
            UpdateTeamStatusRequest {
                team_id: team.team.id,
                is_winner: None,
                is_loser: Some(true),
                disqualified: None,
            },
        )
        .await
        .unwrap();

        assert!(updated.team.is_winner);
        assert!(updated.team.is_loser);
        assert!(!updated.team.disqualified);
    }

    #[tokio::test]
    async fn score_adjustment_accepts_negative_deltas() {
        let state = AppState::new(AppConfig::default());
        let team = registered(&state, "seekers").await;

        adjust_score(
            &state,
            AdjustScoreRequest {
                team_id: team.team.id,
                delta: 30,
            },
        )
        .await
        .unwrap();

        let updated = adjust_score(
            &state,
            AdjustScoreRequest {
                team_id: team.team.id,
                delta: -10,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.team.score, 20);
    }

    #[tokio::test]
    async fn submission_updates_round_and_score() {
        let state = AppState::new(AppConfig::default());
        let team = registered(&state, "seekers").await;

        let response = submit_round(
            &state,
            &claims_for(&team),
            "round1".into(),
            RoundSubmitRequest {
                score: 75,
                attempts: 2,
                time_spent: 184,
            },
        )
        .await
        .unwrap();

        assert_eq!(response.team.score, 75);
        assert_eq!(response.team.completed_rounds["round1"], true);
        assert_eq!(response.round.id, "round1");
        assert!(response.round.completed);
    }

    #[tokio::test]
    async fn disqualified_team_is_rejected_and_unchanged() {
        let state = AppState::new(AppConfig::default());
        let team = registered(&state, "seekers").await;

        update_status(
            &state,
            UpdateTeamStatusRequest {
                team_id: team.team.id,
                is_winner: None,
                is_loser: None,
                disqualified: Some(true),
            },
        )
        .await
        .unwrap();

        let err = submit_round(
            &state,
            &claims_for(&team),
            "round1".into(),
            RoundSubmitRequest {
                score: 50,
                attempts: 1,
                time_spent: 30,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let unchanged = self_view(&state, &claims_for(&team)).await.unwrap();
        assert_eq!(unchanged.team.score, 0);
        assert_eq!(unchanged.team.completed_rounds["round1"], false);
    }

    #[tokio::test]
    async fn unknown_round_is_not_found() {
        let state = AppState::new(AppConfig::default());
        let team = registered(&state, "seekers").await;

        let err = submit_round(
            &state,
            &claims_for(&team),
            "round99".into(),
            RoundSubmitRequest {
                score: 10,
                attempts: 1,
                time_spent: 5,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_an_unknown_team_leaves_the_collection_unchanged() {
        let state = AppState::new(AppConfig::default());
        registered(&state, "seekers").await;

        let err = delete(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(list(&state).await.unwrap().teams.len(), 1);
    }

    #[tokio::test]
    async fn reset_game_reports_the_modified_count() {
        let state = AppState::new(AppConfig::default());
        let team = registered(&state, "seekers").await;
        registered(&state, "finders").await;

        submit_round(
            &state,
            &claims_for(&team),
            "round1".into(),
            RoundSubmitRequest {
                score: 40,
                attempts: 1,
                time_spent: 60,
            },
        )
        .await
        .unwrap();

        assert_eq!(reset_game(&state).await.unwrap(), 2);
        for snapshot in list(&state).await.unwrap().teams {
            assert_eq!(snapshot.score, 0);
            assert!(snapshot.completed_rounds.values().all(|done| !done));
        }
    }

    #[tokio::test]
    async fn login_rejects_disqualified_teams() {
        let state = AppState::new(AppConfig::default());
        let team = registered(&state, "seekers").await;

        update_status(
            &state,
            UpdateTeamStatusRequest {
                team_id: team.team.id,
                is_winner: None,
                is_loser: None,
                disqualified: Some(true),
            },
        )
        .await
        .unwrap();

        let err = login(
            &state,
            LoginRequest {
                name: "seekers".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }
}

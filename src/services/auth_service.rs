//! Bearer-token identification of teams.
//!
//! Tokens are HS256 JWTs carrying the team id and name, issued at
//! registration and login. They identify a team on the player-facing routes;
//! they are not a general authorization layer.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, ServiceError},
    state::SharedState,
};

const TOKEN_TTL_SECS: u64 = 60 * 60 * 24;

/// Claims embedded in a team bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamClaims {
    /// Team primary key.
    pub sub: Uuid,
    /// Team display name at issue time.
    pub name: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: u64,
}

/// Sign a token identifying `team_id` for the next 24 hours.
pub fn issue_token(secret: &str, team_id: Uuid, name: &str) -> Result<String, ServiceError> {
    let claims = TeamClaims {
        sub: team_id,
        name: name.to_owned(),
        exp: unix_now_secs() + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| ServiceError::Internal(format!("failed to sign team token: {err}")))
}

/// Verify a token and return its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<TeamClaims, ServiceError> {
    decode::<TeamClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| ServiceError::Unauthorized(format!("invalid bearer token: {err}")))
}

impl FromRequestParts<SharedState> for TeamClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Unauthorized("expected a bearer token".into()))?;

        verify_token(&state.config().jwt_secret, token).map_err(Into::into)
    }
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify_with_the_same_secret() {
        let id = Uuid::new_v4();
        let token = issue_token("secret", id, "alpha").unwrap();
        let claims = verify_token("secret", &token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.name, "alpha");
    }

    #[test]
    fn verification_rejects_a_different_secret() {
        let token = issue_token("secret", Uuid::new_v4(), "alpha").unwrap();
        assert!(verify_token("other", &token).is_err());
    }

    #[test]
    fn verification_rejects_garbage() {
        assert!(verify_token("secret", "not-a-token").is_err());
    }
}

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Hunt Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::status::get_game_status,
        crate::routes::status::post_game_status,
        crate::routes::teams::register_team,
        crate::routes::teams::list_teams,
        crate::routes::teams::delete_team,
        crate::routes::teams::update_team_status,
        crate::routes::teams::adjust_team_score,
        crate::routes::teams::current_team,
        crate::routes::auth::login,
        crate::routes::rounds::submit_round,
        crate::routes::admin::reset_game,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::ActiveStore,
            crate::dto::status::GameStatusSnapshot,
            crate::dto::status::GameStatusCommandRequest,
            crate::dto::team::RegisterTeamRequest,
            crate::dto::team::LoginRequest,
            crate::dto::team::UpdateTeamStatusRequest,
            crate::dto::team::AdjustScoreRequest,
            crate::dto::team::RoundSubmitRequest,
            crate::dto::team::TeamSnapshot,
            crate::dto::team::RoundResultSnapshot,
            crate::dto::team::TeamWithTokenResponse,
            crate::dto::team::TeamResponse,
            crate::dto::team::TeamListResponse,
            crate::dto::team::DeleteTeamResponse,
            crate::dto::team::RoundSubmitResponse,
            crate::dto::team::RoundOutcome,
            crate::dto::team::ResetGameResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game-status", description = "Shared game clock and start state"),
        (name = "teams", description = "Team registration and administration"),
        (name = "auth", description = "Team token issuing"),
        (name = "rounds", description = "Round submissions"),
        (name = "admin", description = "Event-wide administration"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token scheme referenced by player-facing routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "team_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

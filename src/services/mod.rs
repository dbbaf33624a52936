/// Bearer-token issuing and verification for teams.
pub mod auth_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Game-status singleton: reconciliation, commands, persistence.
pub mod status_service;
/// Background supervision of the persistent store connection.
pub mod storage_supervisor;
/// Team registration, progress, and administration.
pub mod team_service;

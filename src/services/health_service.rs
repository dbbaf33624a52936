use tracing::warn;

use crate::{dao::hunt_store::HuntStore, dto::health::HealthResponse, state::SharedState};

/// Respond with the current health payload while logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let store = state.store().await;
    if let Err(err) = store.health_check().await {
        warn!(error = %err, "storage health check failed");
    }

    HealthResponse::from_degraded(state.is_degraded())
}

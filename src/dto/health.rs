use serde::Serialize;
use utoipa::ToSchema;

/// Which store requests are currently served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveStore {
    /// The persistent database backend.
    Persistent,
    /// The in-process fallback map.
    InMemory,
}

/// Payload of `GET /healthcheck`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"` while a persistent backend serves requests, `"degraded"` while
    /// the process runs on the fallback.
    pub status: String,
    /// The store currently serving requests.
    pub store: ActiveStore,
}

impl HealthResponse {
    /// Derive the payload from the degraded flag.
    pub fn from_degraded(degraded: bool) -> Self {
        if degraded {
            Self {
                status: "degraded".to_owned(),
                store: ActiveStore::InMemory,
            }
        } else {
            Self {
                status: "ok".to_owned(),
                store: ActiveStore::Persistent,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_flag_selects_status_and_store() {
        let healthy = HealthResponse::from_degraded(false);
        assert_eq!(healthy.status, "ok");
        assert_eq!(healthy.store, ActiveStore::Persistent);

        let degraded = HealthResponse::from_degraded(true);
        assert_eq!(degraded.status, "degraded");
        assert_eq!(degraded.store, ActiveStore::InMemory);
    }
}

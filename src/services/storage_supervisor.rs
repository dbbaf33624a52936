//! Background supervision of the persistent store connection.
//!
//! The process always starts on the in-memory fallback. This loop keeps
//! trying to bring a real backend up, installs it when a connection succeeds,
//! reconciles the game-status singleton, and drops back to the fallback as
//! soon as health checks fail again.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{hunt_store::HuntStore, storage::StorageError},
    services::status_service,
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Drive the connect/health-check loop until the process exits.
///
/// `connect` builds a fresh store handle on every attempt; a handle whose
/// health check fails is discarded rather than repaired, and the next outer
/// iteration reconnects from scratch. Degraded-mode entry is also watched
/// between polls: a request handler can demote the process mid-call, and the
/// supervisor must then reconnect rather than keep polling a handle nothing
/// serves from anymore.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn HuntStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.install_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                delay = INITIAL_DELAY;

                status_service::reconcile(&state).await;

                let mut degraded_updates = state.degraded_watcher();
                loop {
                    if *degraded_updates.borrow_and_update() {
                        info!("degraded mode entered mid-request; reconnecting to storage");
                        break;
                    }

                    tokio::select! {
                        _ = sleep(HEALTH_POLL_INTERVAL) => {
                            if let Err(err) = store.health_check().await {
                                warn!(error = %err, "storage health check failed; entering degraded mode");
                                state.use_fallback().await;
                                break;
                            }
                        }
                        changed = degraded_updates.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
            }
        }

        sleep(delay).await;
        delay = (delay * 2).min(MAX_DELAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dao::hunt_store::memory::MemoryHuntStore,
        state::AppState,
    };

    async fn wait_until_installed(state: &SharedState) {
        let mut updates = state.degraded_watcher();
        while *updates.borrow_and_update() {
            updates.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn supervisor_reinstalls_after_a_mid_call_demotion() {
        let state = AppState::new(AppConfig::default());
        let backend = Arc::new(MemoryHuntStore::new());

        let connect_backend = backend.clone();
        tokio::spawn(run(state.clone(), move || {
            let backend = connect_backend.clone();
            async move { Ok::<_, StorageError>(backend as Arc<dyn HuntStore>) }
        }));

        wait_until_installed(&state).await;
        assert!(!state.is_degraded());

        // A request handler hitting a transient error demotes the process.
        state.use_fallback().await;

        // The supervisor must notice and bring the backend back.
        wait_until_installed(&state).await;
        assert!(!state.is_degraded());
    }
}

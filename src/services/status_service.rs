//! Owns the authoritative game-status singleton and its persistence.
//!
//! Command application is a critical section: field writes happen atomically
//! under the singleton's write lock, so no concurrent reader ever observes a
//! half-updated snapshot. Persistence is fire-and-forget relative to the HTTP
//! response; a crash between mutation and a successful save loses that
//! mutation, which is an accepted durability gap for a live event tool.

use tracing::{info, warn};

use crate::{
    dao::{hunt_store::HuntStore, models::GameStatusEntity},
    state::{
        SharedState,
        game_status::{GameCommand, GameStatus, now_ms},
    },
};

/// Current snapshot of the in-memory singleton.
pub async fn snapshot(state: &SharedState) -> GameStatus {
    state.game_status().read().await.clone()
}

/// Apply one command and return the resulting snapshot.
///
/// The write to the persistent store happens in the background; its failure
/// is logged and never rolls back or delays the response.
pub async fn apply(state: &SharedState, command: GameCommand) -> GameStatus {
    let updated = {
        let mut guard = state.game_status().write().await;
        guard.apply(command, now_ms());
        guard.clone()
    };
    state.mark_status_dirty();

    persist_in_background(state.clone(), updated.clone());
    updated
}

/// Reconcile the singleton with a freshly installed real store.
///
/// If no command has been applied yet in this process, the persisted settings
/// record (when present) wins; otherwise the in-memory state is authoritative
/// and is pushed out instead, so admin actions taken while degraded are not
/// clobbered by a stale document. When the store holds no record, the current
/// defaults are seeded into it.
pub async fn reconcile(state: &SharedState) {
    if state.status_synced() {
        return;
    }

    if state.status_dirty() {
        push_current(state).await;
        return;
    }

    match state.with_store(|store| store.load_game_status()).await {
        Ok(Some(entity)) => {
            if adopt_loaded(state, entity).await {
                info!("loaded game status from the store");
                state.mark_status_synced();
            } else {
                // A command landed while the load was in flight; local state
                // stays authoritative and is pushed out instead.
                push_current(state).await;
            }
        }
        Ok(None) => push_current(state).await,
        Err(err) => warn!(error = %err, "failed to load game status during reconciliation"),
    }
}

/// Overwrite the singleton with a loaded settings record, unless a command
/// mutated it since the load started. The dirty re-check happens under the
/// write lock so no command applied concurrently can be clobbered.
async fn adopt_loaded(state: &SharedState, entity: GameStatusEntity) -> bool {
    let mut guard = state.game_status().write().await;
    if state.status_dirty() {
        return false;
    }
    *guard = entity.into();
    true
}

/// Push the current in-memory singleton into the store.
async fn push_current(state: &SharedState) {
    let entity: GameStatusEntity = snapshot(state).await.into();
    match state
        .with_store(move |store| store.save_game_status(entity.clone()))
        .await
    {
        Ok(()) => {
            info!("pushed game status to the store");
            state.mark_status_synced();
        }
        Err(err) => warn!(error = %err, "failed to push game status during reconciliation"),
    }
}

fn persist_in_background(state: SharedState, status: GameStatus) {
    tokio::spawn(async move {
        let entity: GameStatusEntity = status.into();
        if let Err(err) = state
            .with_store(move |store| store.save_game_status(entity.clone()))
            .await
        {
            warn!(error = %err, "background game-status save failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test]
    async fn apply_returns_the_updated_snapshot() {
        let state = AppState::new(AppConfig::default());

        let snapshot = apply(&state, GameCommand::SetStarted(true)).await;
        assert!(snapshot.is_started);
        assert!(snapshot.start_time.is_some());

        let snapshot = apply(&state, GameCommand::StartTimer).await;
        assert!(snapshot.is_timer_running);
        assert!(snapshot.timer_started_at.is_some());
    }

    #[tokio::test]
    async fn snapshot_is_well_formed_without_any_store() {
        let state = AppState::new(AppConfig::default());
        let status = snapshot(&state).await;
        assert!(!status.is_started);
        assert_eq!(status.timer_duration, state.config().timer_duration_ms);
        assert_eq!(status.timer_started_at, None);
    }

    #[tokio::test]
    async fn reconcile_seeds_defaults_into_an_empty_store() {
        let state = AppState::new(AppConfig::default());
        reconcile(&state).await;

        let stored = state
            .with_store(|store| store.load_game_status())
            .await
            .unwrap()
            .expect("settings record seeded");
        assert!(!stored.is_started);
        assert!(state.status_synced());
    }

    #[tokio::test]
    async fn a_command_landing_during_the_load_is_not_adopted_over() {
        let state = AppState::new(AppConfig::default());

        // Stale settings record read before the command below was applied.
        let stale: GameStatusEntity = GameStatus::new(600_000).into();

        apply(&state, GameCommand::SetStarted(true)).await;

        assert!(!adopt_loaded(&state, stale).await);
        assert!(snapshot(&state).await.is_started);
    }

    #[tokio::test]
    async fn reconcile_prefers_local_state_once_dirty() {
        let state = AppState::new(AppConfig::default());
        apply(&state, GameCommand::SetStarted(true)).await;

        reconcile(&state).await;
        let stored = state
            .with_store(|store| store.load_game_status())
            .await
            .unwrap()
            .expect("settings record pushed");
        assert!(stored.is_started);
    }
}

//! Shared application state: the game-status singleton and the store strategy.

pub mod countdown;
pub mod game_status;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use futures::future::BoxFuture;
use tokio::sync::{RwLock, watch};
use tokio::time::timeout;
use tracing::warn;

use crate::{
    config::AppConfig,
    dao::{
        hunt_store::{HuntStore, memory::MemoryHuntStore},
        storage::StorageResult,
    },
    state::game_status::GameStatus,
};

/// Cheap-to-clone handle on [`AppState`].
pub type SharedState = Arc<AppState>;

/// Upper bound on any single store call so a hung backend cannot block a
/// request; past it the call fails over to the in-memory store.
pub const STORE_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Central application state, constructed once at startup and passed by
/// handle to every request handler.
pub struct AppState {
    config: AppConfig,
    store: RwLock<Arc<dyn HuntStore>>,
    memory: Arc<MemoryHuntStore>,
    degraded: watch::Sender<bool>,
    game_status: RwLock<GameStatus>,
    status_synced: AtomicBool,
    status_dirty: AtomicBool,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned
    /// cheaply.
    ///
    /// The application starts degraded, on the in-memory store, until the
    /// supervisor installs a real backend.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        let memory = Arc::new(MemoryHuntStore::new());
        let game_status = GameStatus::new(config.timer_duration_ms);

        Arc::new(Self {
            config,
            store: RwLock::new(memory.clone() as Arc<dyn HuntStore>),
            memory,
            degraded: degraded_tx,
            game_status: RwLock::new(game_status),
            status_synced: AtomicBool::new(false),
            status_dirty: AtomicBool::new(false),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the currently selected store.
    pub async fn store(&self) -> Arc<dyn HuntStore> {
        self.store.read().await.clone()
    }

    /// Install a real store implementation and leave degraded mode.
    pub async fn install_store(&self, store: Arc<dyn HuntStore>) {
        {
            let mut guard = self.store.write().await;
            *guard = store;
        }
        // send_replace updates the value even while no watcher is subscribed
        self.degraded.send_replace(false);
    }

    /// Switch back to the process-pinned in-memory store and enter degraded
    /// mode. Data written to it during earlier degraded periods is retained.
    pub async fn use_fallback(&self) {
        {
            let mut guard = self.store.write().await;
            *guard = self.memory.clone() as Arc<dyn HuntStore>;
        }
        self.degraded.send_replace(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Authoritative in-process game status singleton.
    pub fn game_status(&self) -> &RwLock<GameStatus> {
        &self.game_status
    }

    /// Whether the singleton has been reconciled with a real store.
    pub fn status_synced(&self) -> bool {
        self.status_synced.load(Ordering::Acquire)
    }

    /// Record that reconciliation with a real store completed.
    pub fn mark_status_synced(&self) {
        self.status_synced.store(true, Ordering::Release);
    }

    /// Whether any command mutated the singleton in this process.
    pub fn status_dirty(&self) -> bool {
        self.status_dirty.load(Ordering::Acquire)
    }

    /// Record that a command mutated the singleton.
    pub fn mark_status_dirty(&self) {
        self.status_dirty.store(true, Ordering::Release);
    }

    /// Run a store operation with timeout-bounded failover.
    ///
    /// The first attempt goes to the selected store. On error or timeout the
    /// state flips to the in-memory fallback and the operation is retried
    /// there, so callers only observe a failure if the fallback itself fails.
    pub async fn with_store<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: Fn(Arc<dyn HuntStore>) -> BoxFuture<'static, StorageResult<T>>,
    {
        let store = self.store().await;
        match timeout(STORE_CALL_TIMEOUT, op(store)).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => {
                warn!(error = %err, "store call failed; switching to the in-memory fallback");
            }
            Err(_) => {
                warn!("store call timed out; switching to the in-memory fallback");
            }
        }

        self.use_fallback().await;
        op(self.memory.clone()).await
    }
}

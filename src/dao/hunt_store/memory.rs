//! In-memory fallback store keeping the game operable without a database.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::{
    hunt_store::HuntStore,
    models::{GameStatusEntity, TeamEntity, blank_rounds},
    storage::StorageResult,
};

/// Map-of-collections substitute for the real document store.
///
/// Contract-identical to the MongoDB backend: saves upsert on no match and
/// lookups filter by exact field equality. One instance lives for the whole
/// process so data survives repeated fallback switches.
#[derive(Clone, Default)]
pub struct MemoryHuntStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    teams: RwLock<IndexMap<Uuid, TeamEntity>>,
    settings: RwLock<Option<GameStatusEntity>>,
}

impl MemoryHuntStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HuntStore for MemoryHuntStore {
    fn load_game_status(&self) -> BoxFuture<'static, StorageResult<Option<GameStatusEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.settings.read().await.clone()) })
    }

    fn save_game_status(&self, status: GameStatusEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            *store.inner.settings.write().await = Some(status);
            Ok(())
        })
    }

    fn insert_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.teams.write().await.insert(team.id, team);
            Ok(())
        })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        // Same upsert semantics as insert for a keyed map.
        self.insert_team(team)
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.teams.read().await.get(&id).cloned()) })
    }

    fn find_team_by_name(
        &self,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let teams = store.inner.teams.read().await;
            Ok(teams.values().find(|team| team.name == name).cloned())
        })
    }

    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.teams.read().await.values().cloned().collect()) })
    }

    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let removed = store.inner.teams.write().await.shift_remove(&id);
            Ok(removed.is_some())
        })
    }

    fn reset_teams(
        &self,
        rounds: Vec<String>,
        now_ms: i64,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            let mut teams = store.inner.teams.write().await;
            let mut modified = 0;
            for team in teams.values_mut() {
                team.completed_rounds = blank_rounds(&rounds);
                team.round_details.clear();
                team.score = 0;
                team.last_active = now_ms;
                modified += 1;
            }
            Ok(modified)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounds() -> Vec<String> {
        vec!["round1".to_owned(), "round2".to_owned()]
    }

    fn team(name: &str) -> TeamEntity {
        TeamEntity::new(name.to_owned(), vec!["a".into(), "b".into()], &rounds(), 1_000)
    }

    #[tokio::test]
    async fn settings_upsert_on_no_match() {
        let store = MemoryHuntStore::new();
        assert!(store.load_game_status().await.unwrap().is_none());

        let mut entity: GameStatusEntity = crate::state::game_status::GameStatus::new(600_000).into();
        store.save_game_status(entity.clone()).await.unwrap();
        assert!(store.load_game_status().await.unwrap().is_some());

        entity.is_started = true;
        store.save_game_status(entity).await.unwrap();
        let loaded = store.load_game_status().await.unwrap().unwrap();
        assert!(loaded.is_started);
    }

    #[tokio::test]
    async fn find_by_name_uses_exact_equality() {
        let store = MemoryHuntStore::new();
        store.insert_team(team("alpha")).await.unwrap();

        assert!(store
            .find_team_by_name("alpha".into())
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_team_by_name("Alpha".into())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed() {
        let store = MemoryHuntStore::new();
        let entity = team("alpha");
        let id = entity.id;
        store.insert_team(entity).await.unwrap();

        assert!(store.delete_team(id).await.unwrap());
        assert!(!store.delete_team(id).await.unwrap());
        assert!(store.list_teams().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_clears_progress_for_every_team() {
        let store = MemoryHuntStore::new();
        let mut entity = team("alpha");
        entity.score = 42;
        entity.completed_rounds.insert("round1".into(), true);
        store.insert_team(entity).await.unwrap();
        store.insert_team(team("beta")).await.unwrap();

        let modified = store.reset_teams(rounds(), 2_000).await.unwrap();
        assert_eq!(modified, 2);

        for team in store.list_teams().await.unwrap() {
            assert_eq!(team.score, 0);
            assert!(team.completed_rounds.values().all(|done| !done));
            assert_eq!(team.last_active, 2_000);
        }

        // Matched-count semantics: teams already at the reset values still
        // count on a second reset.
        assert_eq!(store.reset_teams(rounds(), 3_000).await.unwrap(), 2);
    }
}

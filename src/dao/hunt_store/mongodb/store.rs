use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::IndexOptions,
};
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{SettingsDocument, settings_filter, team_filter},
};
use crate::dao::{
    hunt_store::HuntStore,
    models::{GameStatusEntity, TeamEntity},
    storage::StorageResult,
};

const TEAM_COLLECTION_NAME: &str = "teams";
const SETTINGS_COLLECTION_NAME: &str = "settings";

/// Real document-store backend.
///
/// Reconnection is the supervisor's job: when this store starts failing the
/// supervisor discards it, falls back to the in-memory store, and constructs a
/// fresh instance once MongoDB answers again.
#[derive(Clone)]
pub struct MongoHuntStore {
    database: Database,
}

impl MongoHuntStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (_client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let store = Self { database };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        // Name uniqueness is enforced here as well as at registration time so
        // concurrent registrations cannot slip a duplicate through.
        let collection = self.database.collection::<Document>(TEAM_COLLECTION_NAME);
        let index = mongodb::IndexModel::builder()
            .keys(doc! {"name": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("team_name_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: TEAM_COLLECTION_NAME,
                index: "name",
                source,
            })?;

        let settings = self
            .database
            .collection::<Document>(SETTINGS_COLLECTION_NAME);
        let settings_index = mongodb::IndexModel::builder()
            .keys(doc! {"type": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("settings_type_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();

        settings
            .create_index(settings_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: SETTINGS_COLLECTION_NAME,
                index: "type",
                source,
            })?;

        Ok(())
    }

    fn team_collection(&self) -> Collection<TeamEntity> {
        self.database.collection::<TeamEntity>(TEAM_COLLECTION_NAME)
    }

    fn settings_collection(&self) -> Collection<SettingsDocument> {
        self.database
            .collection::<SettingsDocument>(SETTINGS_COLLECTION_NAME)
    }

    async fn load_game_status(&self) -> MongoResult<Option<GameStatusEntity>> {
        let document = self
            .settings_collection()
            .find_one(settings_filter())
            .await
            .map_err(|source| MongoDaoError::LoadStatus { source })?;

        Ok(document.map(|doc| doc.status))
    }

    async fn save_game_status(&self, status: GameStatusEntity) -> MongoResult<()> {
        let document: SettingsDocument = status.into();

        self.settings_collection()
            .replace_one(settings_filter(), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveStatus { source })?;

        Ok(())
    }

    async fn insert_team(&self, team: TeamEntity) -> MongoResult<()> {
        let id = team.id;
        self.team_collection()
            .insert_one(&team)
            .await
            .map_err(|source| MongoDaoError::SaveTeam { id, source })?;
        Ok(())
    }

    async fn save_team(&self, team: TeamEntity) -> MongoResult<()> {
        let id = team.id;
        self.team_collection()
            .replace_one(team_filter(id), &team)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveTeam { id, source })?;
        Ok(())
    }

    async fn find_team(&self, id: Uuid) -> MongoResult<Option<TeamEntity>> {
        self.team_collection()
            .find_one(team_filter(id))
            .await
            .map_err(|source| MongoDaoError::LoadTeam { source })
    }

    async fn find_team_by_name(&self, name: String) -> MongoResult<Option<TeamEntity>> {
        self.team_collection()
            .find_one(doc! { "name": name })
            .await
            .map_err(|source| MongoDaoError::LoadTeam { source })
    }

    async fn list_teams(&self) -> MongoResult<Vec<TeamEntity>> {
        self.team_collection()
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::ListTeams { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListTeams { source })
    }

    async fn delete_team(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .team_collection()
            .delete_one(team_filter(id))
            .await
            .map_err(|source| MongoDaoError::DeleteTeam { id, source })?;
        Ok(result.deleted_count > 0)
    }

    async fn reset_teams(&self, rounds: Vec<String>, now_ms: i64) -> MongoResult<u64> {
        let mut rounds_doc = Document::new();
        for round in &rounds {
            rounds_doc.insert(round, false);
        }

        let result = self
            .team_collection()
            .update_many(
                doc! {},
                doc! { "$set": {
                    "completed_rounds": rounds_doc,
                    "round_details": {},
                    "score": 0,
                    "last_active": now_ms,
                }},
            )
            .await
            .map_err(|source| MongoDaoError::ResetTeams { source })?;

        // Matched, not modified: a team already at score 0 still counts, so
        // both backends report the same number.
        Ok(result.matched_count)
    }

    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }
}

impl HuntStore for MongoHuntStore {
    fn load_game_status(&self) -> BoxFuture<'static, StorageResult<Option<GameStatusEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.load_game_status().await.map_err(Into::into) })
    }

    fn save_game_status(&self, status: GameStatusEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_game_status(status).await.map_err(Into::into) })
    }

    fn insert_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_team(team).await.map_err(Into::into) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_team(team).await.map_err(Into::into) })
    }

    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team(id).await.map_err(Into::into) })
    }

    fn find_team_by_name(
        &self,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team_by_name(name).await.map_err(Into::into) })
    }

    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams().await.map_err(Into::into) })
    }

    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_team(id).await.map_err(Into::into) })
    }

    fn reset_teams(
        &self,
        rounds: Vec<String>,
        now_ms: i64,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.reset_teams(rounds, now_ms).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}

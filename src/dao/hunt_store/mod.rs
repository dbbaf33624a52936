//! Storage strategy: one trait, two contract-identical backends.

pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    models::{GameStatusEntity, TeamEntity},
    storage::StorageResult,
};

/// Abstraction over the persistence layer for team records and the singleton
/// game-status settings record.
///
/// Both implementations honor the same semantics: saves are upserts keyed by
/// the record's unique key, lookups filter by exact field equality, and the
/// return shapes are identical regardless of the backing implementation.
pub trait HuntStore: Send + Sync {
    /// Read the settings record, if one has been persisted.
    fn load_game_status(&self) -> BoxFuture<'static, StorageResult<Option<GameStatusEntity>>>;
    /// Upsert the settings record.
    fn save_game_status(&self, status: GameStatusEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Insert a freshly registered team.
    fn insert_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Upsert a team record keyed by its id.
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look a team up by id.
    fn find_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    /// Look a team up by its unique name.
    fn find_team_by_name(
        &self,
        name: String,
    ) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>>;
    /// List every registered team.
    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Delete a team; returns whether a record was removed.
    fn delete_team(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Reset every team's progress (rounds false, score zero); returns the
    /// number of team records matched by the reset, whether or not a record
    /// already held the reset values.
    fn reset_teams(
        &self,
        rounds: Vec<String>,
        now_ms: i64,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    /// Cheap connectivity check.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

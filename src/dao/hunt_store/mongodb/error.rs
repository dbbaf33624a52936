use thiserror::Error;
use uuid::Uuid;

/// Result alias for MongoDB DAO operations.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Failures raised by the MongoDB store implementation.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection string could not be parsed.
    #[error("invalid MongoDB URI `{uri}`")]
    InvalidUri {
        /// Offending connection string.
        uri: String,
        /// Driver parse failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The driver client could not be constructed.
    #[error("failed to construct MongoDB client")]
    ClientConstruction {
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The initial connectivity ping never succeeded.
    #[error("MongoDB did not answer the initial ping after {attempts} attempts")]
    InitialPing {
        /// Number of ping attempts made.
        attempts: u32,
        /// Last ping failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// A health-check ping failed on an established connection.
    #[error("MongoDB health ping failed")]
    HealthPing {
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// Index creation failed.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Collection the index belongs to.
        collection: &'static str,
        /// Index definition name.
        index: &'static str,
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The settings record could not be read.
    #[error("failed to load the game-status settings record")]
    LoadStatus {
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The settings record could not be written.
    #[error("failed to save the game-status settings record")]
    SaveStatus {
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// A team record could not be written.
    #[error("failed to save team `{id}`")]
    SaveTeam {
        /// Team primary key.
        id: Uuid,
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// A team lookup failed.
    #[error("failed to load team data")]
    LoadTeam {
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The team listing failed.
    #[error("failed to list teams")]
    ListTeams {
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// A team deletion failed.
    #[error("failed to delete team `{id}`")]
    DeleteTeam {
        /// Team primary key.
        id: Uuid,
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
    /// The bulk team reset failed.
    #[error("failed to reset team progress")]
    ResetTeams {
        /// Driver failure.
        #[source]
        source: mongodb::error::Error,
    },
}

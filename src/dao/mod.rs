/// Store strategy trait and its backend implementations.
pub mod hunt_store;
/// Database model definitions.
pub mod models;
/// Storage abstraction layer for database operations.
pub mod storage;

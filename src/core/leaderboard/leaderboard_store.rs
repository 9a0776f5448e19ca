use super::leaderboard_models::{EntryPatch, LeaderboardEntry, StoredRecord};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Database returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Authentication failed: {0}")]
    Auth(String),
}

/// The remote record store holding the leaderboard for one act.
///
/// Mirrors the handful of database calls the bot needs: read everything,
/// push a new child, patch a child, and blank a child out.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, ordered by key. Empty when nothing has been stored yet.
    async fn get(&self) -> Result<Vec<StoredRecord>, StoreError>;

    /// Create a record under a freshly generated key and return that key.
    async fn push(&self, entry: &LeaderboardEntry) -> Result<String, StoreError>;

    /// Merge `patch` into the record at `key`.
    async fn update(&self, key: &str, patch: &EntryPatch) -> Result<(), StoreError>;

    /// Overwrite the record at `key` with an empty object (soft delete).
    async fn clear(&self, key: &str) -> Result<(), StoreError>;
}

/// Lets the service run on a store picked at startup.
#[async_trait]
impl RecordStore for Box<dyn RecordStore> {
    async fn get(&self) -> Result<Vec<StoredRecord>, StoreError> {
        (**self).get().await
    }

    async fn push(&self, entry: &LeaderboardEntry) -> Result<String, StoreError> {
        (**self).push(entry).await
    }

    async fn update(&self, key: &str, patch: &EntryPatch) -> Result<(), StoreError> {
        (**self).update(key, patch).await
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        (**self).clear(key).await
    }
}

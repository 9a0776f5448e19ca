// In-memory implementation of RecordStore.
//
// Used by the service tests and for running the bot without a database
// (`LEADERBOARD_STORE=memory`). It behaves like the realtime database for the
// calls we make: pushed keys sort in creation order, updates merge fields,
// and a cleared key stays behind holding an empty value.

use crate::core::leaderboard::{
    EntryPatch, LeaderboardEntry, RecordStore, StoreError, StoredRecord,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory implementation of RecordStore.
///
/// **DashMap:**
/// A concurrent HashMap, so several command handlers can hit the store at
/// once without a Mutex. `None` values are soft-deleted keys.
pub struct InMemoryRecordStore {
    data: DashMap<String, Option<LeaderboardEntry>>,
    next_id: AtomicU64,
}

impl InMemoryRecordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Keys are the creation time plus a sequence number, zero padded so they
    /// sort lexicographically in push order.
    fn generate_key(&self) -> String {
        let sequence = self.next_id.fetch_add(1, Ordering::SeqCst);
        let millis = chrono::Utc::now().timestamp_millis().max(0);
        format!("-{:013}{:06}", millis, sequence)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let mut records: Vec<StoredRecord> = self
            .data
            .iter()
            .map(|item| StoredRecord {
                key: item.key().clone(),
                entry: item.value().clone(),
            })
            .collect();

        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }

    async fn push(&self, entry: &LeaderboardEntry) -> Result<String, StoreError> {
        let key = self.generate_key();
        self.data.insert(key.clone(), Some(entry.clone()));
        Ok(key)
    }

    async fn update(&self, key: &str, patch: &EntryPatch) -> Result<(), StoreError> {
        let mut slot = self.data.entry(key.to_string()).or_insert(None);
        match slot.value_mut() {
            Some(entry) => patch.apply_to(entry),
            empty => {
                // Patching an empty node creates it from whatever fields were sent.
                let mut entry = LeaderboardEntry::new("", 0, 0);
                patch.apply_to(&mut entry);
                *empty = Some(entry);
            }
        }
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.data.insert(key.to_string(), None);
        Ok(())
    }
}

// Default trait implementation for convenient initialization
impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

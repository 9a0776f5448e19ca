// Leaderboard service - all the business logic behind the leaderboard commands.
//
// Every operation follows the same shape: read the full record set from the
// store, scan it in memory for a case-insensitive name match, then issue at
// most one targeted write. There is no Discord code here; the command layer
// decides what to show for each outcome.

use super::leaderboard_models::{
    AddOutcome, ContributionOutcome, EntryPatch, LeaderboardEntry, StoredRecord,
};
use super::leaderboard_store::{RecordStore, StoreError};
use super::points::points_for;
use thiserror::Error;
use tokio::sync::Mutex;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("No name given")]
    EmptyName,

    #[error("Task `{0}` not recognized")]
    UnknownTask(String),

    #[error("Adding {points} points to `{name}` would overflow their score")]
    Overflow { name: String, points: u32 },

    #[error("Member list starts with a header line")]
    HeaderLine,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Outcome of one line of an `add_batch` call.
#[derive(Debug)]
pub struct BatchLine {
    pub name: String,
    pub result: Result<AddOutcome, LeaderboardError>,
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct LeaderboardService<S: RecordStore> {
    store: S,
    /// Serializes read-modify-write sequences issued by this process.
    /// Writers in other processes are not covered.
    write_guard: Mutex<()>,
}

/// First record (in key order) whose name matches, ignoring case.
fn find_entry(records: Vec<StoredRecord>, name: &str) -> Option<(String, LeaderboardEntry)> {
    records.into_iter().find_map(|record| match record.entry {
        Some(entry) if entry.matches_name(name) => Some((record.key, entry)),
        _ => None,
    })
}

fn trimmed_name(name: &str) -> Result<&str, LeaderboardError> {
    let name = name.trim();
    if name.is_empty() {
        Err(LeaderboardError::EmptyName)
    } else {
        Ok(name)
    }
}

impl<S: RecordStore> LeaderboardService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_guard: Mutex::new(()),
        }
    }

    /// Create an entry unless one with the same name already exists.
    ///
    /// When the name is taken, the existing record is returned untouched and
    /// the supplied rating/contributions are ignored.
    pub async fn add(
        &self,
        name: &str,
        rating: i64,
        contributions: i64,
    ) -> Result<AddOutcome, LeaderboardError> {
        let name = trimmed_name(name)?;
        let _guard = self.write_guard.lock().await;

        let records = self.store.get().await?;
        if let Some((key, existing)) = find_entry(records, name) {
            tracing::debug!(name, key = %key, "Entry already exists, not adding");
            return Ok(AddOutcome::AlreadyExists(existing));
        }

        let entry = LeaderboardEntry::new(name, rating, contributions);
        let key = self.store.push(&entry).await?;
        tracing::info!(name, key = %key, "Added leaderboard entry");

        Ok(AddOutcome::Added { key, entry })
    }

    /// Add one entry per line, in order, with zero rating and contributions.
    ///
    /// A first line reading `name` (any case) is taken as a stray CSV header
    /// and rejects the whole batch before anything is written. Otherwise
    /// every line is attempted; a failing line doesn't stop the ones after it
    /// and nothing already added is rolled back.
    pub async fn add_batch<L: AsRef<str>>(
        &self,
        lines: &[L],
    ) -> Result<Vec<BatchLine>, LeaderboardError> {
        if let Some(first) = lines.first() {
            if first.as_ref().trim().eq_ignore_ascii_case("name") {
                return Err(LeaderboardError::HeaderLine);
            }
        }

        let mut report = Vec::with_capacity(lines.len());
        for line in lines {
            let name = line.as_ref().trim().to_string();
            let result = self.add(&name, 0, 0).await;
            if let Err(err) = &result {
                tracing::warn!(name = %name, "Batch line failed: {}", err);
            }
            report.push(BatchLine { name, result });
        }

        Ok(report)
    }

    /// Overwrite name, rating and contributions of an existing entry.
    ///
    /// Returns `Ok(None)` without writing when no entry matches.
    pub async fn update(
        &self,
        name: &str,
        rating: i64,
        contributions: i64,
    ) -> Result<Option<LeaderboardEntry>, LeaderboardError> {
        let name = trimmed_name(name)?;
        let _guard = self.write_guard.lock().await;

        let records = self.store.get().await?;
        let Some((key, _)) = find_entry(records, name) else {
            tracing::debug!(name, "Update skipped, no matching entry");
            return Ok(None);
        };

        let updated = LeaderboardEntry::new(name, rating, contributions);
        self.store.update(&key, &EntryPatch::full(&updated)).await?;
        tracing::info!(name, key = %key, "Updated leaderboard entry");

        Ok(Some(updated))
    }

    /// Look up an entry by name.
    pub async fn fetch(&self, name: &str) -> Result<Option<LeaderboardEntry>, LeaderboardError> {
        let records = self.store.get().await?;
        Ok(find_entry(records, name.trim()).map(|(_, entry)| entry))
    }

    /// Soft-delete the first matching entry and return what it held.
    pub async fn delete(&self, name: &str) -> Result<Option<LeaderboardEntry>, LeaderboardError> {
        let name = name.trim();
        let _guard = self.write_guard.lock().await;

        let records = self.store.get().await?;
        let Some((key, entry)) = find_entry(records, name) else {
            tracing::debug!(name, "Delete skipped, no matching entry");
            return Ok(None);
        };

        self.store.clear(&key).await?;
        tracing::info!(name, key = %key, "Deleted leaderboard entry");

        Ok(Some(entry))
    }

    /// Add the points for `task` to the entry's rating and count one more
    /// contribution.
    ///
    /// The task label is resolved before the store is touched, so an unknown
    /// label never causes a read or a write.
    pub async fn award_contribution(
        &self,
        name: &str,
        task: &str,
    ) -> Result<ContributionOutcome, LeaderboardError> {
        let task = task.trim();
        let points =
            points_for(task).ok_or_else(|| LeaderboardError::UnknownTask(task.to_string()))?;
        let name = name.trim();
        let _guard = self.write_guard.lock().await;

        let records = self.store.get().await?;
        let Some((key, mut entry)) = find_entry(records, name) else {
            tracing::debug!(name, task, "Contribution skipped, name not present");
            return Ok(ContributionOutcome::NotPresent);
        };

        let overflow = || LeaderboardError::Overflow {
            name: entry.name.clone(),
            points,
        };
        let rating = entry.rating.checked_add(i64::from(points)).ok_or_else(overflow)?;
        let contributions = entry.contributions.checked_add(1).ok_or_else(overflow)?;
        entry.rating = rating;
        entry.contributions = contributions;

        let patch = EntryPatch {
            rating: Some(entry.rating),
            contributions: Some(entry.contributions),
            ..Default::default()
        };
        self.store.update(&key, &patch).await?;
        tracing::info!(
            name,
            task,
            points,
            rating = entry.rating,
            contributions = entry.contributions,
            "Awarded contribution"
        );

        Ok(ContributionOutcome::Awarded { entry, points })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::leaderboard::InMemoryRecordStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Wraps the in-memory store and counts every write that reaches it.
    #[derive(Clone, Default)]
    struct CountingStore {
        inner: Arc<InMemoryRecordStore>,
        writes: Arc<AtomicUsize>,
    }

    impl CountingStore {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecordStore for CountingStore {
        async fn get(&self) -> Result<Vec<StoredRecord>, StoreError> {
            self.inner.get().await
        }

        async fn push(&self, entry: &LeaderboardEntry) -> Result<String, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.push(entry).await
        }

        async fn update(&self, key: &str, patch: &EntryPatch) -> Result<(), StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update(key, patch).await
        }

        async fn clear(&self, key: &str) -> Result<(), StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.clear(key).await
        }
    }

    /// A store whose every call fails, for error propagation.
    struct BrokenStore;

    #[async_trait]
    impl RecordStore for BrokenStore {
        async fn get(&self) -> Result<Vec<StoredRecord>, StoreError> {
            Err(StoreError::Http("connection refused".to_string()))
        }

        async fn push(&self, _: &LeaderboardEntry) -> Result<String, StoreError> {
            Err(StoreError::Http("connection refused".to_string()))
        }

        async fn update(&self, _: &str, _: &EntryPatch) -> Result<(), StoreError> {
            Err(StoreError::Http("connection refused".to_string()))
        }

        async fn clear(&self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Http("connection refused".to_string()))
        }
    }

    fn make_service() -> (LeaderboardService<CountingStore>, CountingStore) {
        let store = CountingStore::default();
        (LeaderboardService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn add_creates_exactly_one_entry() {
        let (service, store) = make_service();

        let outcome = service.add("  Alice ", 10, 2).await.unwrap();

        match outcome {
            AddOutcome::Added { entry, .. } => {
                assert_eq!(entry, LeaderboardEntry::new("Alice", 10, 2))
            }
            other => panic!("expected Added, got {:?}", other),
        }
        let records = store.get().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry, Some(LeaderboardEntry::new("Alice", 10, 2)));
    }

    #[tokio::test]
    async fn add_existing_name_returns_stored_values() {
        let (service, store) = make_service();
        service.add("Alice", 10, 2).await.unwrap();

        let outcome = service.add("ALICE", 99, 99).await.unwrap();

        assert_eq!(
            outcome,
            AddOutcome::AlreadyExists(LeaderboardEntry::new("Alice", 10, 2))
        );
        assert_eq!(store.get().await.unwrap().len(), 1);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn add_rejects_blank_name() {
        let (service, store) = make_service();

        let result = service.add("   ", 0, 0).await;

        assert!(matches!(result, Err(LeaderboardError::EmptyName)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn fetch_is_case_insensitive() {
        let (service, _) = make_service();
        service.add("Alice", 5, 1).await.unwrap();

        let fetched = service.fetch("aLICE").await.unwrap();

        assert_eq!(fetched, Some(LeaderboardEntry::new("Alice", 5, 1)));
        assert_eq!(service.fetch("Bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let (service, store) = make_service();
        service.add("Alice", 5, 1).await.unwrap();

        let updated = service.update("alice", 40, 3).await.unwrap();

        assert_eq!(updated, Some(LeaderboardEntry::new("alice", 40, 3)));
        let records = store.get().await.unwrap();
        assert_eq!(records[0].entry, Some(LeaderboardEntry::new("alice", 40, 3)));
    }

    #[tokio::test]
    async fn update_missing_name_leaves_store_unchanged() {
        let (service, store) = make_service();
        service.add("Alice", 5, 1).await.unwrap();
        let before = store.get().await.unwrap();

        let updated = service.update("Bob", 40, 3).await.unwrap();

        assert_eq!(updated, None);
        assert_eq!(store.get().await.unwrap(), before);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn delete_leaves_residual_key() {
        let (service, store) = make_service();
        service.add("Alice", 5, 1).await.unwrap();

        let deleted = service.delete("ALICE").await.unwrap();

        assert_eq!(deleted, Some(LeaderboardEntry::new("Alice", 5, 1)));
        let records = store.get().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entry, None);
        assert_eq!(service.fetch("alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_only_touches_first_match() {
        let store = CountingStore::default();
        // Duplicates can only appear through racing creators; seed them directly.
        store.push(&LeaderboardEntry::new("Alice", 1, 1)).await.unwrap();
        store.push(&LeaderboardEntry::new("alice", 2, 2)).await.unwrap();
        let service = LeaderboardService::new(store.clone());

        let deleted = service.delete("ALICE").await.unwrap();

        assert_eq!(deleted, Some(LeaderboardEntry::new("Alice", 1, 1)));
        assert_eq!(
            service.fetch("Alice").await.unwrap(),
            Some(LeaderboardEntry::new("alice", 2, 2))
        );
    }

    #[tokio::test]
    async fn name_can_be_added_again_after_delete() {
        let (service, store) = make_service();
        service.add("Alice", 5, 1).await.unwrap();
        service.delete("Alice").await.unwrap();

        let outcome = service.add("Alice", 0, 0).await.unwrap();

        assert!(matches!(outcome, AddOutcome::Added { .. }));
        assert_eq!(store.get().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn contribution_adds_points_and_one_contribution() {
        let (service, store) = make_service();
        service.add("Alice", 10, 2).await.unwrap();

        let outcome = service
            .award_contribution("alice", "Pull Request")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ContributionOutcome::Awarded {
                entry: LeaderboardEntry::new("Alice", 30, 3),
                points: 20,
            }
        );
        // The stored name keeps its original case.
        let records = store.get().await.unwrap();
        assert_eq!(records[0].entry, Some(LeaderboardEntry::new("Alice", 30, 3)));
    }

    #[tokio::test]
    async fn contribution_that_would_overflow_writes_nothing() {
        let (service, store) = make_service();
        service.add("Alice", 0, 0).await.unwrap();
        service.update("Alice", i64::MAX, 0).await.unwrap();

        let result = service.award_contribution("Alice", "blog").await;

        match result {
            Err(LeaderboardError::Overflow { name, points }) => {
                assert_eq!(name, "Alice");
                assert_eq!(points, 15);
            }
            other => panic!("expected Overflow, got {:?}", other),
        }
        assert_eq!(store.writes(), 2);
        assert_eq!(
            service.fetch("alice").await.unwrap(),
            Some(LeaderboardEntry::new("Alice", i64::MAX, 0))
        );
    }

    #[tokio::test]
    async fn contribution_count_overflow_is_rejected() {
        let (service, store) = make_service();
        service.add("Alice", 0, i64::MAX).await.unwrap();

        let result = service.award_contribution("Alice", "idea").await;

        assert!(matches!(result, Err(LeaderboardError::Overflow { .. })));
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn contribution_for_absent_name_writes_nothing() {
        let (service, store) = make_service();
        service.add("Alice", 10, 2).await.unwrap();

        let outcome = service.award_contribution("Bob", "blog").await.unwrap();

        assert_eq!(outcome, ContributionOutcome::NotPresent);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn contribution_with_unknown_task_is_an_error() {
        let (service, store) = make_service();
        service.add("Alice", 10, 2).await.unwrap();

        let result = service.award_contribution("Alice", "nonexistent task").await;

        match result {
            Err(LeaderboardError::UnknownTask(task)) => assert_eq!(task, "nonexistent task"),
            other => panic!("expected UnknownTask, got {:?}", other),
        }
        assert_eq!(store.writes(), 1);
        assert_eq!(
            service.fetch("Alice").await.unwrap(),
            Some(LeaderboardEntry::new("Alice", 10, 2))
        );
    }

    #[tokio::test]
    async fn batch_with_header_performs_no_writes() {
        let (service, store) = make_service();

        let result = service.add_batch(&["Name", "Alice", "Bob"]).await;

        assert!(matches!(result, Err(LeaderboardError::HeaderLine)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn header_check_ignores_case_and_whitespace() {
        let (service, store) = make_service();

        let result = service.add_batch(&[" NAME ", "Alice"]).await;

        assert!(matches!(result, Err(LeaderboardError::HeaderLine)));
        assert_eq!(store.writes(), 0);
        assert_eq!(service.fetch("Alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn batch_adds_each_line_and_keeps_going() {
        let (service, store) = make_service();
        service.add("Bob", 50, 5).await.unwrap();

        let report = service
            .add_batch(&["Alice", "", "bob", "Carol"])
            .await
            .unwrap();

        assert_eq!(report.len(), 4);
        assert!(matches!(report[0].result, Ok(AddOutcome::Added { .. })));
        assert!(matches!(report[1].result, Err(LeaderboardError::EmptyName)));
        assert!(matches!(
            report[2].result,
            Ok(AddOutcome::AlreadyExists(_))
        ));
        assert!(matches!(report[3].result, Ok(AddOutcome::Added { .. })));
        assert_eq!(store.get().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let service = LeaderboardService::new(BrokenStore);

        let result = service.fetch("Alice").await;

        assert!(matches!(result, Err(LeaderboardError::Store(_))));
    }

    #[test]
    fn leaderboard_error_messages_are_descriptive() {
        assert_eq!(LeaderboardError::EmptyName.to_string(), "No name given");
        assert!(LeaderboardError::UnknownTask("gardening".into())
            .to_string()
            .contains("gardening"));
    }
}

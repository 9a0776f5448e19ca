// Leaderboard domain models.
//
// These mirror the records kept in the remote database. The wire field names
// (`Name`, `Rating`, `Contributions`) are fixed by the data already stored
// there, so the serde renames must not change.

use serde::{Deserialize, Serialize};

/// One leaderboard record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Rating")]
    pub rating: i64,
    #[serde(rename = "Contributions")]
    pub contributions: i64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, rating: i64, contributions: i64) -> Self {
        Self {
            name: name.into(),
            rating,
            contributions,
        }
    }

    /// Case-insensitive name comparison used by every lookup.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

/// Lowercases a name for comparison. Stored names keep their original case.
///
/// This is Unicode lowercasing, not full case folding: "Straße" and
/// "STRASSE" are different names here.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// A record as returned by the store: its key plus the decoded entry.
///
/// `entry` is `None` for soft-deleted keys (which hold an empty object) and for
/// anything else that doesn't decode as an entry. Those never match a lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub key: String,
    pub entry: Option<LeaderboardEntry>,
}

/// Partial update for an existing record. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryPatch {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Rating", skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(rename = "Contributions", skip_serializing_if = "Option::is_none")]
    pub contributions: Option<i64>,
}

impl EntryPatch {
    /// Overwrite all three fields.
    pub fn full(entry: &LeaderboardEntry) -> Self {
        Self {
            name: Some(entry.name.clone()),
            rating: Some(entry.rating),
            contributions: Some(entry.contributions),
        }
    }

    /// Apply the patch to an in-memory entry.
    pub fn apply_to(&self, entry: &mut LeaderboardEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(rating) = self.rating {
            entry.rating = rating;
        }
        if let Some(contributions) = self.contributions {
            entry.contributions = contributions;
        }
    }
}

/// Result of an `add` call.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// A new record was pushed under `key`.
    Added { key: String, entry: LeaderboardEntry },
    /// A record with the same name (ignoring case) is already present.
    AlreadyExists(LeaderboardEntry),
}

/// Result of awarding a contribution.
#[derive(Debug, Clone, PartialEq)]
pub enum ContributionOutcome {
    Awarded { entry: LeaderboardEntry, points: u32 },
    NotPresent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_uses_capitalized_wire_names() {
        let entry = LeaderboardEntry::new("Alice", 20, 1);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "Name": "Alice", "Rating": 20, "Contributions": 1 })
        );
    }

    #[test]
    fn empty_object_is_not_an_entry() {
        let decoded = serde_json::from_value::<LeaderboardEntry>(serde_json::json!({}));
        assert!(decoded.is_err());
    }

    #[test]
    fn patch_skips_absent_fields() {
        let patch = EntryPatch {
            rating: Some(35),
            contributions: Some(2),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "Rating": 35, "Contributions": 2 })
        );
    }

    #[test]
    fn name_matching_ignores_case() {
        let entry = LeaderboardEntry::new("Alice", 0, 0);
        assert!(entry.matches_name("aLICE"));
        assert!(!entry.matches_name("Alicia"));
    }
}

// Core leaderboard module - records, points table, display cards and the service.

pub mod leaderboard_display;
pub mod leaderboard_models;
pub mod leaderboard_service;
pub mod leaderboard_store;
pub mod points;

pub use leaderboard_display::LeaderboardCard;
pub use leaderboard_models::{
    AddOutcome, ContributionOutcome, EntryPatch, LeaderboardEntry, StoredRecord,
};
pub use leaderboard_service::{LeaderboardError, LeaderboardService};
pub use leaderboard_store::{RecordStore, StoreError};

// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "firebase/mod.rs"]
pub mod firebase;

#[path = "leaderboard/mod.rs"]
pub mod leaderboard;

#[path = "recruits/members_file.rs"]
pub mod recruits;

#[path = "images/shibe_client.rs"]
pub mod images;

// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "leaderboard/mod.rs"]
pub mod leaderboard;

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "attendance/attendance_report.rs"]
pub mod attendance;

// Discord commands module.
// Each feature gets its own command file.

pub mod checks;

pub mod general;

pub mod leaderboard;

pub mod attendance;

// Bot presence management
pub mod presence;

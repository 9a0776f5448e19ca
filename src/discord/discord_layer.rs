// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "leaderboard/formatter.rs"]
pub mod formatter;

#[path = "moderation/bait_handler.rs"]
pub mod moderation;

use crate::config::BotConfig;
use crate::core::leaderboard::{LeaderboardService, RecordStore};
use crate::core::moderation::ModerationService;
use crate::infra::images::ShibeClient;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command and event.
pub struct Data {
    pub leaderboard: Arc<LeaderboardService<Box<dyn RecordStore>>>,
    pub moderation: Arc<ModerationService>,
    pub shibe: Arc<ShibeClient>,
    pub config: Arc<BotConfig>,
}

// Moderation service - decides what to do with an incoming message.
//
// This service handles:
// - Bait channel detection (post there and you get banned)
// - Keyword replies ("cyscom github", "cyscom website")
//
// NO Discord dependencies here - just pure domain logic.

use super::moderation_models::{ModerationAction, ModerationConfig, KEYWORD_REPLIES};

/// Classifies messages against the configured bait channel and keywords.
pub struct ModerationService {
    config: ModerationConfig,
}

impl ModerationService {
    pub fn new(config: ModerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// Decide what to do with a message posted in `channel_id`.
    ///
    /// The bait channel check comes first, then each keyword in table order.
    /// Only the first rule that matches applies.
    pub fn classify(&self, channel_id: u64, content: &str) -> ModerationAction {
        if self.config.bait_channel_id == Some(channel_id) {
            return ModerationAction::BanAuthor;
        }

        let lowered = content.to_lowercase();
        KEYWORD_REPLIES
            .iter()
            .find(|keyword| lowered.contains(keyword.phrase))
            .map(|keyword| ModerationAction::Reply(keyword.reply))
            .unwrap_or(ModerationAction::None)
    }

    /// Text posted to the log channel when the ban call fails.
    pub fn ban_failure_notice(author_id: u64, content: &str) -> String {
        format!(
            "USER cannot be banned due to permission issue User-<@{}> \nmessage-{}",
            author_id, content
        )
    }
}

// Moderation domain models.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer will convert these to Discord-specific actions.

/// Channels the moderation listener cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModerationConfig {
    /// Posting here gets the author banned.
    pub bait_channel_id: Option<u64>,
    /// Where ban notices and ban failures are reported.
    pub log_channel_id: Option<u64>,
}

/// What should happen in response to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    /// Message is not interesting.
    None,
    /// Author posted in the bait channel.
    BanAuthor,
    /// Reply in the same channel with a canned link.
    Reply(&'static str),
}

/// A keyword trigger and the reply it produces.
#[derive(Debug, Clone, Copy)]
pub struct KeywordReply {
    /// Lowercase phrase searched for anywhere in the message.
    pub phrase: &'static str,
    pub reply: &'static str,
}

/// Checked in order; the first phrase found wins.
pub const KEYWORD_REPLIES: [KeywordReply; 2] = [
    KeywordReply {
        phrase: "cyscom github",
        reply: "Our GitHub is https://github.com/cyscomvit",
    },
    KeywordReply {
        phrase: "cyscom website",
        reply: "Our Website is https://cyscomvit.com",
    },
];

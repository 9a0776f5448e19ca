// Display model for leaderboard replies.
//
// A `LeaderboardCard` is a plain description of an embed. The Discord layer
// turns it into a `CreateEmbed`; keeping it here lets the exact fields be
// tested without a Discord context.

/// Logo shown as the thumbnail of every card.
pub const CYSCOM_LOGO_URL: &str = "https://cyscomvit.com/assets/images/logo.png";

/// Discord "blue" (matches discord.Color.blue()).
pub const CARD_COLOR: u32 = 0x3498DB;

#[derive(Debug, Clone, PartialEq)]
pub struct CardField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardCard {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<CardField>,
    pub thumbnail_url: &'static str,
}

impl LeaderboardCard {
    fn base(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            color: CARD_COLOR,
            fields: Vec::new(),
            thumbnail_url: CYSCOM_LOGO_URL,
        }
    }

    fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.fields.push(CardField {
            name: name.to_string(),
            value: value.to_string(),
            inline: true,
        });
        self
    }

    /// The standard Name/Rating/Contributions card.
    pub fn entry(
        context_title: &str,
        description: &str,
        name: &str,
        rating: i64,
        contributions: i64,
    ) -> Self {
        Self::base(context_title, description)
            .field("Name", name)
            .field("Rating", rating)
            .field("Contributions", contributions)
    }

    /// Notice posted to the log channel after a bait-channel ban.
    pub fn ban_notice(context_title: &str, author_id: u64, content: &str) -> Self {
        Self::base(context_title, "Banned for typing in #SPAM_BAIT.")
            .field("Name", author_id)
            .field("Message", content)
    }
}

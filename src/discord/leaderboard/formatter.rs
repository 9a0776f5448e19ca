use crate::core::leaderboard::LeaderboardCard;
use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, CreateEmbed};

/// Title used when the guild name can't be resolved.
pub const FALLBACK_TITLE: &str = "CYSCOM";

pub fn card_to_embed(card: &LeaderboardCard) -> CreateEmbed {
    card.fields.iter().fold(
        CreateEmbed::default()
            .title(&card.title)
            .description(&card.description)
            .color(serenity::Colour::new(card.color))
            .thumbnail(card.thumbnail_url),
        |embed, field| embed.field(&field.name, &field.value, field.inline),
    )
}

/// Name of the guild the command was run in, used as the card title.
pub async fn context_title(ctx: Context<'_>) -> String {
    let cached = ctx.guild().map(|guild| guild.name.clone());
    if let Some(name) = cached {
        return name;
    }

    ctx.partial_guild()
        .await
        .map(|guild| guild.name)
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

/// Build the standard entry card for this context and send it.
pub async fn send_entry_card(
    ctx: Context<'_>,
    description: &str,
    name: &str,
    rating: i64,
    contributions: i64,
) -> Result<(), Error> {
    let title = context_title(ctx).await;
    let card = LeaderboardCard::entry(&title, description, name, rating, contributions);
    ctx.send(poise::CreateReply::default().embed(card_to_embed(&card)))
        .await?;
    Ok(())
}

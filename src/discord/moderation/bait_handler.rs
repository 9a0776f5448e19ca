// Discord-side moderation - turns the core's decision into bans and replies.
//
// Runs for every message from the event handler, next to (not instead of)
// normal command processing.

use crate::core::leaderboard::LeaderboardCard;
use crate::core::moderation::{ModerationAction, ModerationConfig, ModerationService};
use crate::discord::formatter::{card_to_embed, FALLBACK_TITLE};
use poise::serenity_prelude::{self as serenity, CreateMessage};

/// Check a message and apply whatever the moderation service decides.
///
/// Discord failures are logged and swallowed; a message never fails the
/// event handler.
pub async fn handle_message(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    moderation: &ModerationService,
) {
    // Skip bots (including ourselves)
    if msg.author.bot {
        return;
    }

    match moderation.classify(msg.channel_id.get(), &msg.content) {
        ModerationAction::None => {}
        ModerationAction::Reply(text) => {
            if let Err(e) = msg.channel_id.say(&ctx.http, text).await {
                tracing::warn!("Failed to send keyword reply: {}", e);
            }
        }
        ModerationAction::BanAuthor => ban_author(ctx, msg, moderation.config()).await,
    }
}

async fn ban_author(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    config: &ModerationConfig,
) {
    let user_id = msg.author.id.get();
    let log_channel = config.log_channel_id.map(serenity::ChannelId::new);

    let Some(guild_id) = msg.guild_id else {
        tracing::warn!(user_id, "Bait channel message outside a guild, not banning");
        return;
    };

    if let Err(e) = guild_id.ban(&ctx.http, msg.author.id, 0).await {
        tracing::warn!(user_id, "Failed to ban bait channel poster: {}", e);
        if let Some(channel) = log_channel {
            let notice = ModerationService::ban_failure_notice(user_id, &msg.content);
            if let Err(e) = channel.say(&ctx.http, notice).await {
                tracing::error!("Failed to report ban failure: {}", e);
            }
        }
        return;
    }

    tracing::info!(user_id, guild_id = guild_id.get(), "Banned bait channel poster");

    let Some(channel) = log_channel else {
        return;
    };

    let title = ctx
        .cache
        .guild(guild_id)
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());
    let card = LeaderboardCard::ban_notice(&title, user_id, &msg.content);

    if let Err(e) = channel
        .send_message(&ctx.http, CreateMessage::new().embed(card_to_embed(&card)))
        .await
    {
        tracing::error!("Failed to send ban notice: {}", e);
    }
}

// Bot presence and lifecycle glue.

use poise::serenity_prelude as serenity;

pub const BOT_VERSION_BANNER: &str = "CYSCOM VITCC Bot v1.0";

/// Show "Playing CYSCOM Leaderboard" once the gateway is ready.
pub fn on_ready(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::playing("CYSCOM Leaderboard");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
    tracing::info!("{}", BOT_VERSION_BANNER);
}

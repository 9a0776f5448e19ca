// Small utility commands that don't touch the leaderboard.

use crate::discord::{Context, Error};
use std::path::PathBuf;

/// Working directory of the bot process, shown by `ping`.
fn bot_location() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Check to see if the bot is working. Also returns where it is running.
#[poise::command(prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let msg = format!("pong from bot running at {}", bot_location().display());
    tracing::info!("{}", msg);
    ctx.say(msg).await?;
    Ok(())
}

/// Return a doge pic.
#[poise::command(prefix_command)]
pub async fn doge(ctx: Context<'_>) -> Result<(), Error> {
    match ctx.data().shibe.random_picture_url().await {
        Ok(url) => {
            ctx.say(url).await?;
        }
        Err(e) => {
            tracing::warn!("Failed to fetch doge picture: {}", e);
            ctx.say(e.to_string()).await?;
        }
    }
    Ok(())
}

/// Return the sum of 2 numbers. Call it by `sum num1 num2`.
#[poise::command(prefix_command)]
pub async fn sum(
    ctx: Context<'_>,
    #[description = "First number"] num_one: i64,
    #[description = "Second number"] num_two: i64,
) -> Result<(), Error> {
    let reply = match num_one.checked_add(num_two) {
        Some(total) => total.to_string(),
        None => "That sum is too large for me.".to_string(),
    };
    ctx.say(reply).await?;
    Ok(())
}

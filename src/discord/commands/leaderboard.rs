// Discord commands for the leaderboard.
//
// **Notice the pattern:**
// 1. Pull the arguments out of the message
// 2. Call the leaderboard service
// 3. Turn the outcome into a card, a plain-text notice, or silence
//
// Store failures are returned with `?` and end up in the framework's
// `on_error` hook.

use crate::core::leaderboard::points::known_tasks;
use crate::core::leaderboard::{AddOutcome, ContributionOutcome, LeaderboardError};
use crate::discord::commands::checks::{is_board_member, is_leaderboard_manager, is_member};
use crate::discord::formatter::send_entry_card;
use crate::discord::{Context, Error};
use crate::infra::recruits::read_member_names;
use std::path::Path;

/// Send the reply for one `add` call, shared by `add_data` and `add_recruits`.
async fn report_add(
    ctx: Context<'_>,
    result: Result<AddOutcome, LeaderboardError>,
) -> Result<(), Error> {
    match result {
        Ok(AddOutcome::Added { entry, .. }) => {
            send_entry_card(
                ctx,
                "Added data to the CYSCOM Leaderboard.",
                &entry.name,
                entry.rating,
                entry.contributions,
            )
            .await
        }
        Ok(AddOutcome::AlreadyExists(existing)) => {
            send_entry_card(
                ctx,
                "User already exists",
                &existing.name,
                existing.rating,
                existing.contributions,
            )
            .await
        }
        Err(LeaderboardError::EmptyName) => {
            ctx.say("No name given").await?;
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

/// Add data to the leaderboard. Call it by `add_data "name" rating contributions`.
#[poise::command(prefix_command, guild_only, check = "is_board_member")]
pub async fn add_data(
    ctx: Context<'_>,
    #[description = "Member name (quote it if it has spaces)"] name: String,
    #[description = "Starting rating"] rating: Option<i64>,
    #[description = "Starting contributions"] contributions: Option<i64>,
) -> Result<(), Error> {
    let result = ctx
        .data()
        .leaderboard
        .add(&name, rating.unwrap_or(0), contributions.unwrap_or(0))
        .await;

    report_add(ctx, result).await
}

/// Add recruits by reading the members file next to the bot, one name per line.
#[poise::command(prefix_command, guild_only, check = "is_board_member")]
pub async fn add_recruits(ctx: Context<'_>) -> Result<(), Error> {
    let path = Path::new(&ctx.data().config.members_file);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| ctx.data().config.members_file.clone());

    let Some(names) = read_member_names(path).await? else {
        let folder = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        ctx.say(format!("File {} not found in {}", file_name, folder.display()))
            .await?;
        return Ok(());
    };
    tracing::info!(count = names.len(), "Adding recruits from {}", file_name);

    let report = match ctx.data().leaderboard.add_batch(names.as_slice()).await {
        Ok(report) => report,
        Err(LeaderboardError::HeaderLine) => {
            ctx.say(format!(
                "Members file ({}) is supposed to only have 1 name on each line, and must have no headers!",
                file_name
            ))
            .await?;
            return Ok(());
        }
        Err(other) => return Err(other.into()),
    };

    // Keep going after a failed line; nothing already added is undone.
    for line in report {
        if let Err(err) = report_add(ctx, line.result).await {
            tracing::error!(name = %line.name, "Failed to add recruit: {}", err);
        }
    }

    Ok(())
}

/// Overwrite a member's rating and contributions.
#[poise::command(prefix_command, guild_only, check = "is_board_member")]
pub async fn update_data(
    ctx: Context<'_>,
    #[description = "Member name"] name: String,
    #[description = "New rating"] rating: Option<i64>,
    #[description = "New contributions"] contributions: Option<i64>,
) -> Result<(), Error> {
    let result = ctx
        .data()
        .leaderboard
        .update(&name, rating.unwrap_or(0), contributions.unwrap_or(0))
        .await;

    match result {
        Ok(Some(entry)) => {
            send_entry_card(
                ctx,
                "Updated data on the CYSCOM Leaderboard.",
                &entry.name,
                entry.rating,
                entry.contributions,
            )
            .await
        }
        // Unknown names are ignored without a reply.
        Ok(None) => Ok(()),
        Err(LeaderboardError::EmptyName) => {
            ctx.say("No name given").await?;
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

/// Fetch data from the leaderboard.
#[poise::command(prefix_command, guild_only, check = "is_member")]
pub async fn fetch_data(
    ctx: Context<'_>,
    #[description = "Member name"] name: String,
) -> Result<(), Error> {
    if let Some(entry) = ctx.data().leaderboard.fetch(&name).await? {
        send_entry_card(
            ctx,
            "Fetched CYSCOM Leaderboard profile.",
            &entry.name,
            entry.rating,
            entry.contributions,
        )
        .await?;
    }
    Ok(())
}

/// Delete someone from the leaderboard.
#[poise::command(prefix_command, guild_only, check = "is_board_member")]
pub async fn delete_data(
    ctx: Context<'_>,
    #[description = "Member name"] name: String,
) -> Result<(), Error> {
    if let Some(entry) = ctx.data().leaderboard.delete(&name).await? {
        send_entry_card(
            ctx,
            "Deleted data from the Leaderboard",
            &entry.name,
            entry.rating,
            entry.contributions,
        )
        .await?;
    }
    Ok(())
}

/// Add contribution to a member. Call it by `contribution "name" task`.
#[poise::command(prefix_command, guild_only, check = "is_leaderboard_manager")]
pub async fn contribution(
    ctx: Context<'_>,
    #[description = "Member name"] name: String,
    #[description = "Task label, e.g. pull request"]
    #[rest]
    task: String,
) -> Result<(), Error> {
    match ctx.data().leaderboard.award_contribution(&name, &task).await {
        Ok(ContributionOutcome::Awarded { entry, .. }) => {
            send_entry_card(
                ctx,
                "Added contribution to the CYSCOM Leaderboard.",
                &entry.name,
                entry.rating,
                entry.contributions,
            )
            .await
        }
        Ok(ContributionOutcome::NotPresent) => {
            ctx.say("Name not present").await?;
            Ok(())
        }
        Err(LeaderboardError::UnknownTask(task)) => {
            let known = known_tasks().collect::<Vec<_>>().join(", ");
            ctx.say(format!(
                "Task `{}` not recognized. Known tasks: {}",
                task, known
            ))
            .await?;
            Ok(())
        }
        Err(err @ LeaderboardError::Overflow { .. }) => {
            ctx.say(err.to_string()).await?;
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

// Role checks for the leaderboard commands.
//
// Access is granted by role NAME, the way the server's roles are set up.
// Used as poise `check = "..."` hooks; a `false` result surfaces as
// `FrameworkError::CommandCheckFailed`.

use crate::discord::{Context, Error};

pub const BOARD_ROLES: &[&str] = &["Board Member"];
pub const MEMBER_ROLES: &[&str] = &["Member", "Board Member"];
pub const LEADERBOARD_ROLES: &[&str] = &["Leaderboard", "Board Member"];
pub const ATTENDANCE_ROLES: &[&str] = &["Member", "Cabinet Member"];

/// True when any of the member's role names is in `allowed`.
pub fn any_role_allowed<'a>(
    role_names: impl IntoIterator<Item = &'a str>,
    allowed: &[&str],
) -> bool {
    role_names
        .into_iter()
        .any(|name| allowed.iter().any(|allowed| *allowed == name))
}

async fn author_has_any_role(ctx: Context<'_>, allowed: &[&str]) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(false);
    };
    let role_ids = match ctx.author_member().await {
        Some(member) => member.roles.clone(),
        None => return Ok(false),
    };

    let guild_roles = guild_id.roles(ctx.http()).await?;
    let names = role_ids
        .iter()
        .filter_map(|id| guild_roles.get(id))
        .map(|role| role.name.as_str());

    let allowed_here = any_role_allowed(names, allowed);
    if !allowed_here {
        tracing::debug!(
            user_id = ctx.author().id.get(),
            command = %ctx.command().qualified_name,
            "Role check failed"
        );
    }

    Ok(allowed_here)
}

pub async fn is_board_member(ctx: Context<'_>) -> Result<bool, Error> {
    author_has_any_role(ctx, BOARD_ROLES).await
}

pub async fn is_member(ctx: Context<'_>) -> Result<bool, Error> {
    author_has_any_role(ctx, MEMBER_ROLES).await
}

pub async fn is_leaderboard_manager(ctx: Context<'_>) -> Result<bool, Error> {
    author_has_any_role(ctx, LEADERBOARD_ROLES).await
}

pub async fn is_attendance_taker(ctx: Context<'_>) -> Result<bool, Error> {
    author_has_any_role(ctx, ATTENDANCE_ROLES).await
}

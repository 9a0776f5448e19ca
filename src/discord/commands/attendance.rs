use crate::core::attendance::{format_attendance, Attendee};
use crate::discord::commands::checks::is_attendance_taker;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Who is connected to the voice channel called `channel_name`.
fn voice_occupancy(
    guild: &serenity::Guild,
    channel_name: &str,
) -> Option<(String, u64, Vec<Attendee>)> {
    let channel = guild
        .channels
        .values()
        .find(|c| c.kind == serenity::ChannelType::Voice && c.name == channel_name)?;

    let mut attendees: Vec<Attendee> = guild
        .voice_states
        .values()
        .filter(|state| state.channel_id == Some(channel.id))
        .map(|state| {
            let name = guild
                .members
                .get(&state.user_id)
                .or(state.member.as_ref())
                .map(|member| member.user.name.clone())
                .unwrap_or_else(|| state.user_id.to_string());
            Attendee {
                name,
                user_id: state.user_id.get(),
            }
        })
        .collect();
    attendees.sort_by(|a, b| a.name.cmp(&b.name));

    Some((channel.name.clone(), channel.id.get(), attendees))
}

/// Mark attendance in a voice channel. Call it by `attendance voice_channel_name`.
#[poise::command(prefix_command, guild_only, check = "is_attendance_taker")]
pub async fn attendance(
    ctx: Context<'_>,
    #[description = "Voice channel name"]
    #[rest]
    channel_name: String,
) -> Result<(), Error> {
    // Read everything out of the cache before the first await.
    let occupancy = match ctx.guild() {
        Some(guild) => voice_occupancy(&guild, channel_name.trim()),
        None => None,
    };

    let reply = match occupancy {
        Some((name, id, attendees)) => {
            tracing::info!(channel = %name, count = attendees.len(), "Took attendance");
            format_attendance(&name, id, &attendees)
        }
        None => "Voice channel not found.".to_string(),
    };

    ctx.say(reply).await?;
    Ok(())
}

// Attendance report for a voice channel.
//
// The Discord layer gathers who is sitting in the channel; this module only
// formats the listing.

/// Someone currently connected to the voice channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub name: String,
    pub user_id: u64,
}

/// Render the occupancy listing as a Discord code block.
pub fn format_attendance(channel_name: &str, channel_id: u64, attendees: &[Attendee]) -> String {
    let mut message = format!("```Members in channel {} - {}\n\n", channel_name, channel_id);

    if attendees.is_empty() {
        message.push_str("There are no members in this voice channel.\n");
    } else {
        message.push_str(&format!("There are {} member(s)\n\n", attendees.len()));
        for (index, attendee) in attendees.iter().enumerate() {
            message.push_str(&format!(
                "{} - {} - {}\n",
                index + 1,
                attendee.name,
                attendee.user_id
            ));
        }
    }

    message.push_str("```");
    message
}

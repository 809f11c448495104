//! Static user-facing texts (Telegram HTML) and the join keyboard.

use crate::{
    domain::ChannelRef,
    formatting::escape_html,
    messaging::types::{InlineButton, InlineKeyboard, CHECK_JOIN_ACTION},
};

pub const ALERT_JOIN_REQUIRED: &str = "Join required";
pub const ALERT_CHECK_FAILED: &str = "Error checking membership";

const FALLBACK_NAME: &str = "friend";

pub fn join_keyboard(channel: &ChannelRef) -> InlineKeyboard {
    InlineKeyboard::one_per_row(vec![
        InlineButton::url(format!("Join {}", channel.chat_handle()), channel.join_url()),
        InlineButton::callback("I have joined ✅ Check access", CHECK_JOIN_ACTION),
    ])
}

pub fn welcome(first_name: Option<&str>, channel: &ChannelRef) -> String {
    let name = first_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_NAME);
    format!(
        "Hello {}!\n\nOne small requirement first: to use this bot you need to join our channel {}.\n\nYou can join directly with the button below.",
        escape_html(name),
        escape_html(&channel.chat_handle())
    )
}

pub fn access_granted() -> String {
    "Thanks, access granted. You can now send a username to look up its public information.\n\nExamples:\n<code>@username</code> or <code>username</code>\nor share a contact."
        .to_string()
}

/// Sent after a failed re-check.
pub fn not_a_member_yet() -> String {
    "You don't appear to be a member of the channel yet. Please join, then press \"I have joined\"."
        .to_string()
}

/// Sent when a gated message arrives from a non-member.
pub fn join_first() -> String {
    "Please join our channel first to get access.".to_string()
}

pub fn gate_unverified() -> String {
    "I couldn't verify your channel membership right now. Please try again later.".to_string()
}

pub fn command_rejected() -> String {
    "Please send a username (or share a contact), not a command.".to_string()
}

pub fn phone_unsupported() -> String {
    "That looks like a phone number. I can't look up a public profile from an arbitrary number.\n\nOptions:\n1) <b>Share</b> the person's Telegram contact (attach contact) and I can read the name it carries.\n2) Or send the person's public username, if they have one.\n\n(Telegram does not allow phone-to-profile lookups for privacy reasons.)"
        .to_string()
}

pub fn not_found() -> String {
    "I couldn't find public information for that username. Make sure it is spelled correctly and belongs to a public profile."
        .to_string()
}

pub fn profile_header(handle: &str) -> String {
    format!("🔎 Public info for {}:", escape_html(handle))
}

pub fn avatar_notice() -> String {
    "Profile photo found, sending thumbnail...".to_string()
}

pub fn contact_received(first_name: &str, last_name: Option<&str>, phone: &str) -> String {
    let name = format!("{} {}", first_name, last_name.unwrap_or("")).trim().to_string();
    format!(
        "Contact received:\n• Name: {}\n• Phone: {}",
        escape_html(&name),
        escape_html(phone)
    )
}

pub fn generic_apology() -> String {
    "Sorry, something went wrong while handling your message. Please try again.".to_string()
}

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a sent message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// The sender of an inbound event, as reported by the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: UserId,
    pub first_name: Option<String>,
}

impl UserIdentity {
    pub fn new(id: UserId, first_name: Option<String>) -> Self {
        Self { id, first_name }
    }
}

/// Handle of the gate channel, stored without the leading `@`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelRef(String);

impl ChannelRef {
    /// Returns `None` when the handle is blank once whitespace and `@` are stripped.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim().trim_start_matches('@').trim();
        if name.is_empty() {
            return None;
        }
        Some(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// `@name`, the form the Bot API accepts as a chat id.
    pub fn chat_handle(&self) -> String {
        format!("@{}", self.0)
    }

    pub fn join_url(&self) -> String {
        format!("https://t.me/{}", self.0)
    }
}

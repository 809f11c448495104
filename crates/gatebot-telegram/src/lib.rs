//! Telegram adapter (teloxide).
//!
//! This crate implements the `gatebot-core` platform and messaging ports over
//! the Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{
        Chat, ChatMemberKind, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, ParseMode,
        Recipient,
    },
};

pub mod handlers;
pub mod router;

use gatebot_core::{
    domain::{ChannelRef, ChatId, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{ButtonAction, InlineKeyboard},
    },
    platform::{
        port::PlatformPort,
        types::{MembershipStatus, ProfileFields, ProfileKind, ThumbnailRef},
    },
    Result,
};

/// Single Bot API client backing both ports. Every call is one request, no retries.
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_user(user_id: UserId) -> Result<teloxide::types::UserId> {
        u64::try_from(user_id.0)
            .map(teloxide::types::UserId)
            .map_err(|_| Error::External(format!("invalid user id: {}", user_id.0)))
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    /// Like `map_err`, but an unknown handle becomes `Error::NotFound`.
    fn map_lookup_err(handle: &str, e: teloxide::RequestError) -> Error {
        match e {
            teloxide::RequestError::Api(teloxide::ApiError::ChatNotFound) => {
                Error::NotFound(handle.to_string())
            }
            other => Self::map_err(other),
        }
    }

    fn message_ref(chat_id: ChatId, msg: &Message) -> MessageRef {
        MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        }
    }
}

pub fn membership_status(kind: &ChatMemberKind) -> MembershipStatus {
    match kind {
        ChatMemberKind::Owner(_) => MembershipStatus::Owner,
        ChatMemberKind::Administrator(_) => MembershipStatus::Administrator,
        ChatMemberKind::Member => MembershipStatus::Member,
        ChatMemberKind::Restricted(_) => MembershipStatus::Restricted,
        ChatMemberKind::Left => MembershipStatus::Left,
        ChatMemberKind::Banned(_) => MembershipStatus::Banned,
    }
}

fn profile_kind(chat: &Chat) -> ProfileKind {
    if chat.is_private() {
        ProfileKind::Private
    } else if chat.is_channel() {
        ProfileKind::Channel
    } else if chat.is_supergroup() {
        ProfileKind::Supergroup
    } else {
        ProfileKind::Group
    }
}

pub fn profile_from_chat(chat: &Chat) -> ProfileFields {
    let owned = |v: Option<&str>| v.map(str::to_string);
    ProfileFields {
        id: chat.id.0,
        kind: profile_kind(chat),
        title: owned(chat.title()),
        username: owned(chat.username()),
        first_name: owned(chat.first_name()),
        last_name: owned(chat.last_name()),
        bio: owned(chat.bio()),
        description: owned(chat.description()),
        invite_link: owned(chat.invite_link()),
        has_photo: chat.photo.is_some(),
    }
}

pub fn keyboard_markup(keyboard: &InlineKeyboard) -> Result<InlineKeyboardMarkup> {
    let mut rows = Vec::with_capacity(keyboard.rows.len());
    for row in &keyboard.rows {
        let mut buttons = Vec::with_capacity(row.len());
        for b in row {
            let button = match &b.action {
                ButtonAction::Url(url) => {
                    let url = reqwest::Url::parse(url)
                        .map_err(|e| Error::External(format!("invalid button url {url}: {e}")))?;
                    InlineKeyboardButton::url(b.label.clone(), url)
                }
                ButtonAction::Callback(data) => {
                    InlineKeyboardButton::callback(b.label.clone(), data.clone())
                }
            };
            buttons.push(button);
        }
        rows.push(buttons);
    }
    Ok(InlineKeyboardMarkup::new(rows))
}

#[async_trait]
impl PlatformPort for TelegramClient {
    async fn get_membership_status(
        &self,
        channel: &ChannelRef,
        user_id: UserId,
    ) -> Result<MembershipStatus> {
        let member = self
            .bot
            .get_chat_member(
                Recipient::ChannelUsername(channel.chat_handle()),
                Self::tg_user(user_id)?,
            )
            .await
            .map_err(Self::map_err)?;
        Ok(membership_status(&member.kind))
    }

    async fn get_public_profile(&self, handle: &str) -> Result<ProfileFields> {
        let chat = self
            .bot
            .get_chat(Recipient::ChannelUsername(handle.to_string()))
            .await
            .map_err(|e| Self::map_lookup_err(handle, e))?;
        Ok(profile_from_chat(&chat))
    }

    async fn get_avatar_thumbnails(
        &self,
        user_id: UserId,
        offset: u32,
        limit: u8,
    ) -> Result<Vec<ThumbnailRef>> {
        let photos = self
            .bot
            .get_user_profile_photos(Self::tg_user(user_id)?)
            .offset(offset)
            .limit(limit)
            .await
            .map_err(Self::map_err)?;

        // Each photo comes in several sizes; the first one is the smallest.
        Ok(photos
            .photos
            .iter()
            .filter_map(|sizes| sizes.first())
            .map(|size| ThumbnailRef(size.file.id.clone()))
            .collect())
    }
}

#[async_trait]
impl MessagingPort for TelegramClient {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<MessageRef> {
        let mut req = self
            .bot
            .send_message(Self::tg_chat(chat_id), html.to_string())
            .parse_mode(ParseMode::Html);
        if let Some(kb) = &keyboard {
            req = req.reply_markup(keyboard_markup(kb)?);
        }
        let msg = req.await.map_err(Self::map_err)?;
        Ok(Self::message_ref(chat_id, &msg))
    }

    async fn send_photo(&self, chat_id: ChatId, photo: &ThumbnailRef) -> Result<MessageRef> {
        let msg = self
            .bot
            .send_photo(Self::tg_chat(chat_id), InputFile::file_id(photo.0.clone()))
            .await
            .map_err(Self::map_err)?;
        Ok(Self::message_ref(chat_id, &msg))
    }

    async fn answer_action(
        &self,
        action_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        let mut req = self.bot.answer_callback_query(action_id.to_string());
        if let Some(t) = text {
            req = req.text(t.to_string());
        }
        if show_alert {
            req = req.show_alert(true);
        }
        req.await.map_err(Self::map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatebot_core::messaging::types::InlineButton;
    use teloxide::types::InlineKeyboardButtonKind;

    fn member_kind(json: serde_json::Value) -> ChatMemberKind {
        let mut member = json;
        member["user"] = serde_json::json!({
            "id": 77,
            "is_bot": false,
            "first_name": "Asha"
        });
        serde_json::from_value::<teloxide::types::ChatMember>(member)
            .expect("valid chat member")
            .kind
    }

    const ADMIN_RIGHTS: &[&str] = &[
        "can_be_edited",
        "can_manage_chat",
        "can_change_info",
        "can_post_messages",
        "can_edit_messages",
        "can_delete_messages",
        "can_manage_video_chats",
        "can_invite_users",
        "can_restrict_members",
        "can_pin_messages",
        "can_promote_members",
        "can_manage_topics",
    ];

    const RESTRICTIONS: &[&str] = &[
        "can_send_messages",
        "can_send_media_messages",
        "can_send_audios",
        "can_send_documents",
        "can_send_photos",
        "can_send_videos",
        "can_send_video_notes",
        "can_send_voice_notes",
        "can_send_polls",
        "can_send_other_messages",
        "can_add_web_page_previews",
        "can_change_info",
        "can_invite_users",
        "can_pin_messages",
        "can_manage_topics",
    ];

    fn with_flags(mut base: serde_json::Value, flags: &[&str], value: bool) -> serde_json::Value {
        for f in flags {
            base[*f] = serde_json::Value::Bool(value);
        }
        base
    }

    #[test]
    fn maps_every_member_kind() {
        let owner = member_kind(serde_json::json!({
            "status": "creator",
            "is_anonymous": false
        }));
        let admin = member_kind(with_flags(
            serde_json::json!({ "status": "administrator", "is_anonymous": false }),
            ADMIN_RIGHTS,
            false,
        ));
        let restricted = member_kind(with_flags(
            serde_json::json!({ "status": "restricted", "is_member": true, "until_date": 0 }),
            RESTRICTIONS,
            false,
        ));
        let banned = member_kind(serde_json::json!({ "status": "kicked", "until_date": 0 }));

        assert_eq!(membership_status(&owner), MembershipStatus::Owner);
        assert_eq!(membership_status(&admin), MembershipStatus::Administrator);
        assert_eq!(membership_status(&restricted), MembershipStatus::Restricted);
        assert_eq!(membership_status(&banned), MembershipStatus::Banned);
        assert_eq!(
            membership_status(&ChatMemberKind::Member),
            MembershipStatus::Member
        );
        assert_eq!(
            membership_status(&ChatMemberKind::Left),
            MembershipStatus::Left
        );
    }

    #[test]
    fn private_chat_maps_to_profile() {
        let chat: Chat = serde_json::from_value(serde_json::json!({
            "id": 555,
            "type": "private",
            "username": "johnsmith",
            "first_name": "John",
            "last_name": "Smith",
            "bio": "Rustacean",
            "photo": {
                "small_file_id": "s",
                "small_file_unique_id": "su",
                "big_file_id": "b",
                "big_file_unique_id": "bu"
            }
        }))
        .expect("valid chat");

        let p = profile_from_chat(&chat);
        assert_eq!(p.id, 555);
        assert_eq!(p.kind, ProfileKind::Private);
        assert_eq!(p.username.as_deref(), Some("johnsmith"));
        assert_eq!(p.display_name().as_deref(), Some("John Smith"));
        assert_eq!(p.bio.as_deref(), Some("Rustacean"));
        assert_eq!(p.title, None);
        assert!(p.has_photo);
    }

    #[test]
    fn channel_chat_maps_to_profile() {
        let chat: Chat = serde_json::from_value(serde_json::json!({
            "id": -1001234,
            "type": "channel",
            "title": "News",
            "username": "news",
            "description": "Daily news",
            "invite_link": "https://t.me/+abc"
        }))
        .expect("valid chat");

        let p = profile_from_chat(&chat);
        assert_eq!(p.kind, ProfileKind::Channel);
        assert_eq!(p.title.as_deref(), Some("News"));
        assert_eq!(p.description.as_deref(), Some("Daily news"));
        assert_eq!(p.invite_link.as_deref(), Some("https://t.me/+abc"));
        assert_eq!(p.first_name, None);
        assert!(!p.has_photo);
    }

    #[test]
    fn chat_not_found_maps_to_not_found() {
        let err = TelegramClient::map_lookup_err(
            "@ghost",
            teloxide::RequestError::Api(teloxide::ApiError::ChatNotFound),
        );
        assert!(matches!(err, Error::NotFound(ref h) if h == "@ghost"));

        let err = TelegramClient::map_lookup_err(
            "@ghost",
            teloxide::RequestError::Api(teloxide::ApiError::BotBlocked),
        );
        assert!(matches!(err, Error::External(_)));
    }

    #[test]
    fn builds_markup_rows() {
        let kb = InlineKeyboard::one_per_row(vec![
            InlineButton::url("Join @c", "https://t.me/c"),
            InlineButton::callback("Check", "CHECK_JOIN"),
        ]);
        let markup = keyboard_markup(&kb).unwrap();
        assert_eq!(markup.inline_keyboard.len(), 2);

        match &markup.inline_keyboard[0][0].kind {
            InlineKeyboardButtonKind::Url(u) => assert_eq!(u.as_str(), "https://t.me/c"),
            other => panic!("expected url button, got {other:?}"),
        }
        match &markup.inline_keyboard[1][0].kind {
            InlineKeyboardButtonKind::CallbackData(d) => assert_eq!(d, "CHECK_JOIN"),
            other => panic!("expected callback button, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unparseable_url() {
        let kb = InlineKeyboard::one_per_row(vec![InlineButton::url("bad", "not a url")]);
        assert!(keyboard_markup(&kb).is_err());
    }

    #[test]
    fn negative_user_id_is_rejected() {
        assert!(TelegramClient::tg_user(UserId(-5)).is_err());
        assert_eq!(
            TelegramClient::tg_user(UserId(5)).unwrap(),
            teloxide::types::UserId(5)
        );
    }
}

//! In-memory port fakes shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    domain::{ChannelRef, ChatId, MessageId, MessageRef, UserId},
    errors::Error,
    messaging::{port::MessagingPort, types::InlineKeyboard},
    platform::{
        port::PlatformPort,
        types::{MembershipStatus, ProfileFields, ThumbnailRef},
    },
    Result,
};

#[derive(Default)]
struct PlatformState {
    status: Option<MembershipStatus>,
    membership_error: Option<String>,
    profile: Option<ProfileFields>,
    profile_error: Option<String>,
    thumbnails: Vec<ThumbnailRef>,
    thumbnails_error: Option<String>,
    membership_queries: Vec<(String, UserId)>,
    profile_queries: Vec<String>,
    thumbnail_queries: Vec<(UserId, u32, u8)>,
}

#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<PlatformState>,
}

impl FakePlatform {
    pub fn with_status(status: MembershipStatus) -> Self {
        let fake = Self::default();
        fake.set_status(status);
        fake
    }

    pub fn with_membership_error(msg: &str) -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().membership_error = Some(msg.to_string());
        fake
    }

    pub fn set_status(&self, status: MembershipStatus) {
        let mut s = self.state.lock().unwrap();
        s.status = Some(status);
        s.membership_error = None;
    }

    pub fn set_profile(&self, profile: ProfileFields) {
        self.state.lock().unwrap().profile = Some(profile);
    }

    pub fn set_profile_error(&self, msg: &str) {
        self.state.lock().unwrap().profile_error = Some(msg.to_string());
    }

    pub fn set_thumbnails(&self, thumbs: Vec<ThumbnailRef>) {
        self.state.lock().unwrap().thumbnails = thumbs;
    }

    pub fn set_thumbnails_error(&self, msg: &str) {
        self.state.lock().unwrap().thumbnails_error = Some(msg.to_string());
    }

    pub fn membership_calls(&self) -> usize {
        self.state.lock().unwrap().membership_queries.len()
    }

    pub fn last_membership_query(&self) -> Option<(String, UserId)> {
        self.state.lock().unwrap().membership_queries.last().cloned()
    }

    pub fn profile_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().profile_queries.clone()
    }

    pub fn thumbnail_queries(&self) -> Vec<(UserId, u32, u8)> {
        self.state.lock().unwrap().thumbnail_queries.clone()
    }
}

#[async_trait]
impl PlatformPort for FakePlatform {
    async fn get_membership_status(
        &self,
        channel: &ChannelRef,
        user_id: UserId,
    ) -> Result<MembershipStatus> {
        let mut s = self.state.lock().unwrap();
        s.membership_queries
            .push((channel.name().to_string(), user_id));
        if let Some(e) = &s.membership_error {
            return Err(Error::External(e.clone()));
        }
        Ok(s.status.unwrap_or(MembershipStatus::Unknown))
    }

    async fn get_public_profile(&self, handle: &str) -> Result<ProfileFields> {
        let mut s = self.state.lock().unwrap();
        s.profile_queries.push(handle.to_string());
        if let Some(e) = &s.profile_error {
            return Err(Error::External(e.clone()));
        }
        s.profile
            .clone()
            .ok_or_else(|| Error::NotFound(handle.to_string()))
    }

    async fn get_avatar_thumbnails(
        &self,
        user_id: UserId,
        offset: u32,
        limit: u8,
    ) -> Result<Vec<ThumbnailRef>> {
        let mut s = self.state.lock().unwrap();
        s.thumbnail_queries.push((user_id, offset, limit));
        if let Some(e) = &s.thumbnails_error {
            return Err(Error::External(e.clone()));
        }
        Ok(s.thumbnails.clone())
    }
}

/// One outbound call recorded by [`FakeMessenger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Html {
        chat_id: ChatId,
        html: String,
        keyboard: Option<InlineKeyboard>,
    },
    Photo {
        chat_id: ChatId,
        photo: ThumbnailRef,
    },
    Answer {
        action_id: String,
        text: Option<String>,
        show_alert: bool,
    },
}

#[derive(Default)]
pub struct FakeMessenger {
    sent: Mutex<Vec<Sent>>,
    fail_photos: Mutex<bool>,
    fail_html: Mutex<bool>,
    fail_answers: Mutex<bool>,
}

impl FakeMessenger {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_photos(&self) {
        *self.fail_photos.lock().unwrap() = true;
    }

    pub fn fail_html(&self) {
        *self.fail_html.lock().unwrap() = true;
    }

    /// Make `answer_action` fail like an expired callback query.
    pub fn fail_answers(&self) {
        *self.fail_answers.lock().unwrap() = true;
    }

    fn next_ref(&self, chat_id: ChatId) -> MessageRef {
        let n = self.sent.lock().unwrap().len() as i32;
        MessageRef {
            chat_id,
            message_id: MessageId(n + 1),
        }
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<MessageRef> {
        if *self.fail_html.lock().unwrap() {
            return Err(Error::External("message send failed".to_string()));
        }
        let msg = self.next_ref(chat_id);
        self.sent.lock().unwrap().push(Sent::Html {
            chat_id,
            html: html.to_string(),
            keyboard,
        });
        Ok(msg)
    }

    async fn send_photo(&self, chat_id: ChatId, photo: &ThumbnailRef) -> Result<MessageRef> {
        if *self.fail_photos.lock().unwrap() {
            return Err(Error::External("photo upload failed".to_string()));
        }
        let msg = self.next_ref(chat_id);
        self.sent.lock().unwrap().push(Sent::Photo {
            chat_id,
            photo: photo.clone(),
        });
        Ok(msg)
    }

    async fn answer_action(
        &self,
        action_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        if *self.fail_answers.lock().unwrap() {
            return Err(Error::External(
                "Bad Request: query is too old and response timeout expired".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(Sent::Answer {
            action_id: action_id.to_string(),
            text: text.map(str::to_string),
            show_alert,
        });
        Ok(())
    }
}

//! Query dispatch for authorized users.
//!
//! Input is classified purely by its shape, then routed to one branch:
//! reject commands, explain the phone-number limitation, or resolve a public
//! handle and format whatever fields the platform returned.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::{
    domain::UserId,
    errors::Error,
    formatting::escape_html,
    platform::{
        port::PlatformPort,
        types::{ProfileFields, ProfileKind, ThumbnailRef},
    },
    replies,
};

pub const COMMAND_PREFIX: char = '/';
pub const HANDLE_PREFIX: char = '@';

/// A contact card shared from the requester's own client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryInput {
    Text(String),
    Contact(SharedContact),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryClassification {
    Command,
    PhoneLike,
    /// Carries the normalized handle (always `@`-prefixed).
    UsernameLike(String),
}

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?\d{6,15}$").expect("valid regex"))
}

pub fn classify(text: &str) -> QueryClassification {
    let text = text.trim();
    if text.starts_with(COMMAND_PREFIX) {
        return QueryClassification::Command;
    }
    if phone_pattern().is_match(text) {
        return QueryClassification::PhoneLike;
    }
    QueryClassification::UsernameLike(normalize_handle(text))
}

/// Prepend the handle marker when absent. Idempotent.
pub fn normalize_handle(text: &str) -> String {
    let text = text.trim();
    if text.starts_with(HANDLE_PREFIX) {
        text.to_string()
    } else {
        format!("{HANDLE_PREFIX}{text}")
    }
}

/// Outcome of the best-effort avatar lookup. Never fatal to the reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvatarLookup {
    Found(ThumbnailRef),
    Missing,
    Failed(String),
}

impl AvatarLookup {
    pub fn into_found(self) -> Option<ThumbnailRef> {
        match self {
            Self::Found(t) => Some(t),
            Self::Missing | Self::Failed(_) => None,
        }
    }
}

/// Photo sent after the primary reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarFollowUp {
    pub notice: String,
    pub photo: ThumbnailRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub html: String,
    pub follow_up: Option<AvatarFollowUp>,
}

impl Reply {
    pub fn text(html: String) -> Self {
        Self {
            html,
            follow_up: None,
        }
    }
}

#[derive(Clone)]
pub struct QueryDispatcher {
    platform: Arc<dyn PlatformPort>,
}

impl QueryDispatcher {
    pub fn new(platform: Arc<dyn PlatformPort>) -> Self {
        Self { platform }
    }

    /// Only call after the gate returned `Authorized` for this interaction.
    pub async fn handle(&self, input: QueryInput) -> Reply {
        match input {
            QueryInput::Contact(contact) => Reply::text(replies::contact_received(
                &contact.first_name,
                contact.last_name.as_deref(),
                &contact.phone_number,
            )),
            QueryInput::Text(text) => match classify(&text) {
                QueryClassification::Command => Reply::text(replies::command_rejected()),
                QueryClassification::PhoneLike => Reply::text(replies::phone_unsupported()),
                QueryClassification::UsernameLike(handle) => self.lookup(&handle).await,
            },
        }
    }

    async fn lookup(&self, handle: &str) -> Reply {
        if handle.trim_start_matches(HANDLE_PREFIX).is_empty() {
            return Reply::text(replies::not_found());
        }

        let profile = match self.platform.get_public_profile(handle).await {
            Ok(p) => p,
            Err(Error::NotFound(_)) => {
                tracing::debug!(handle, "no public profile for handle");
                return Reply::text(replies::not_found());
            }
            Err(e) => {
                tracing::warn!(handle, error = %e, "public profile lookup failed");
                return Reply::text(replies::not_found());
            }
        };

        let mut reply = Reply::text(format_profile(handle, &profile));
        if profile.kind == ProfileKind::Private {
            reply.follow_up = self
                .first_avatar(UserId(profile.id))
                .await
                .into_found()
                .map(|photo| AvatarFollowUp {
                    notice: replies::avatar_notice(),
                    photo,
                });
        }
        reply
    }

    async fn first_avatar(&self, user_id: UserId) -> AvatarLookup {
        match self.platform.get_avatar_thumbnails(user_id, 0, 1).await {
            Ok(thumbs) => match thumbs.into_iter().next() {
                Some(t) => AvatarLookup::Found(t),
                None => AvatarLookup::Missing,
            },
            Err(e) => {
                tracing::debug!(user_id = user_id.0, error = %e, "avatar lookup failed");
                AvatarLookup::Failed(e.to_string())
            }
        }
    }
}

/// Header plus one line per present field, in a fixed order.
pub fn format_profile(handle: &str, p: &ProfileFields) -> String {
    let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(escape_html);

    let mut parts = vec![replies::profile_header(handle)];
    parts.push(format!("• id: <code>{}</code>", p.id));
    parts.push(format!("• type: {}", p.kind.as_str()));
    if let Some(title) = present(&p.title) {
        parts.push(format!("• title: {title}"));
    }
    if let Some(username) = present(&p.username) {
        parts.push(format!("• username: @{username}"));
    }
    if let Some(name) = p.display_name() {
        parts.push(format!("• name: {}", escape_html(&name)));
    }
    if let Some(bio) = present(&p.bio) {
        parts.push(format!("• bio: {bio}"));
    }
    if let Some(description) = present(&p.description) {
        parts.push(format!("• description: {description}"));
    }
    if let Some(link) = present(&p.invite_link) {
        parts.push(format!("• invite_link: {link}"));
    }
    if p.has_photo {
        parts.push("• has profile photo".to_string());
    }
    parts.join("\n")
}

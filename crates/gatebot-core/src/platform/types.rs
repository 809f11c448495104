use std::fmt;

/// A user's relation to a channel, as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MembershipStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Banned,
    Unknown,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Administrator => "administrator",
            Self::Member => "member",
            Self::Restricted => "restricted",
            Self::Left => "left",
            Self::Banned => "banned",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a resolved chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileKind {
    /// An individual user.
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ProfileKind {
    /// Bot API spelling of the chat type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
        }
    }
}

/// Public fields of a resolved handle. Absent fields stay `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileFields {
    pub id: i64,
    pub kind: ProfileKind,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub description: Option<String>,
    pub invite_link: Option<String>,
    pub has_photo: bool,
}

impl ProfileFields {
    /// A profile with only the mandatory fields set.
    pub fn new(id: i64, kind: ProfileKind) -> Self {
        Self {
            id,
            kind,
            title: None,
            username: None,
            first_name: None,
            last_name: None,
            bio: None,
            description: None,
            invite_link: None,
            has_photo: false,
        }
    }

    /// First and last name joined, `None` when both are absent or blank.
    pub fn display_name(&self) -> Option<String> {
        if self.first_name.is_none() && self.last_name.is_none() {
            return None;
        }
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Opaque platform file id of an avatar thumbnail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailRef(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_and_trims() {
        let mut p = ProfileFields::new(1, ProfileKind::Private);
        assert_eq!(p.display_name(), None);

        p.first_name = Some("John".to_string());
        assert_eq!(p.display_name().as_deref(), Some("John"));

        p.last_name = Some("Smith".to_string());
        assert_eq!(p.display_name().as_deref(), Some("John Smith"));

        p.first_name = None;
        assert_eq!(p.display_name().as_deref(), Some("Smith"));
    }

    #[test]
    fn kind_uses_bot_api_spelling() {
        assert_eq!(ProfileKind::Private.as_str(), "private");
        assert_eq!(ProfileKind::Supergroup.as_str(), "supergroup");
    }
}

use async_trait::async_trait;

use crate::{
    domain::{ChannelRef, UserId},
    platform::types::{MembershipStatus, ProfileFields, ThumbnailRef},
    Result,
};

/// Platform lookups the gate and the dispatcher depend on.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait PlatformPort: Send + Sync {
    async fn get_membership_status(
        &self,
        channel: &ChannelRef,
        user_id: UserId,
    ) -> Result<MembershipStatus>;

    /// `handle` includes the leading `@`.
    async fn get_public_profile(&self, handle: &str) -> Result<ProfileFields>;

    async fn get_avatar_thumbnails(
        &self,
        user_id: UserId,
        offset: u32,
        limit: u8,
    ) -> Result<Vec<ThumbnailRef>>;
}

//! Channel-membership gate.
//!
//! Every decision is derived from a live membership query; nothing is cached,
//! so a user who joins mid-session is let through on their next action.

use std::sync::Arc;

use crate::{
    domain::{ChannelRef, UserIdentity},
    platform::{port::PlatformPort, types::MembershipStatus},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Authorized,
    Unauthorized,
}

impl AuthorizationDecision {
    pub fn from_status(status: MembershipStatus) -> Self {
        match status {
            MembershipStatus::Owner
            | MembershipStatus::Administrator
            | MembershipStatus::Member
            | MembershipStatus::Restricted => Self::Authorized,
            MembershipStatus::Left | MembershipStatus::Banned | MembershipStatus::Unknown => {
                Self::Unauthorized
            }
        }
    }
}

/// The membership query itself failed. Callers must treat this as unauthorized.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("membership check failed: {0}")]
    CheckFailed(String),
}

#[derive(Clone)]
pub struct MembershipGate {
    platform: Arc<dyn PlatformPort>,
    channel: ChannelRef,
}

impl MembershipGate {
    pub fn new(platform: Arc<dyn PlatformPort>, channel: ChannelRef) -> Self {
        Self { platform, channel }
    }

    pub fn channel(&self) -> &ChannelRef {
        &self.channel
    }

    pub async fn check_authorization(
        &self,
        user: &UserIdentity,
    ) -> Result<AuthorizationDecision, GateError> {
        match self
            .platform
            .get_membership_status(&self.channel, user.id)
            .await
        {
            Ok(status) => {
                let decision = AuthorizationDecision::from_status(status);
                tracing::debug!(
                    user_id = user.id.0,
                    channel = self.channel.name(),
                    %status,
                    ?decision,
                    "membership checked"
                );
                Ok(decision)
            }
            Err(e) => {
                tracing::warn!(
                    user_id = user.id.0,
                    channel = self.channel.name(),
                    error = %e,
                    "membership check failed"
                );
                Err(GateError::CheckFailed(e.to_string()))
            }
        }
    }
}

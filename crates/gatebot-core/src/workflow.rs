//! Per-event access-gating workflow.
//!
//! Every content-bearing event goes through the membership gate first; only an
//! `Authorized` decision reaches the dispatcher. Each call is independent and
//! holds no state beyond the immutable channel reference.

use std::sync::Arc;

use crate::{
    dispatch::{QueryDispatcher, QueryInput, Reply, SharedContact},
    domain::{ChannelRef, ChatId, UserIdentity},
    gate::{AuthorizationDecision, GateError, MembershipGate},
    messaging::{port::MessagingPort, types::CHECK_JOIN_ACTION},
    platform::port::PlatformPort,
    replies, Result,
};

#[derive(Clone)]
pub struct GateWorkflow {
    gate: MembershipGate,
    dispatcher: QueryDispatcher,
    messenger: Arc<dyn MessagingPort>,
}

impl GateWorkflow {
    pub fn new(
        platform: Arc<dyn PlatformPort>,
        messenger: Arc<dyn MessagingPort>,
        channel: ChannelRef,
    ) -> Self {
        Self {
            gate: MembershipGate::new(platform.clone(), channel),
            dispatcher: QueryDispatcher::new(platform),
            messenger,
        }
    }

    fn channel(&self) -> &ChannelRef {
        self.gate.channel()
    }

    pub async fn on_start(&self, chat_id: ChatId, user: &UserIdentity) -> Result<()> {
        let html = replies::welcome(user.first_name.as_deref(), self.channel());
        self.messenger
            .send_html(chat_id, &html, Some(replies::join_keyboard(self.channel())))
            .await?;
        Ok(())
    }

    /// Inline button press. Only the re-check action does anything.
    pub async fn on_action(
        &self,
        action_id: &str,
        data: &str,
        chat_id: ChatId,
        user: &UserIdentity,
    ) -> Result<()> {
        if data != CHECK_JOIN_ACTION {
            tracing::debug!(user_id = user.id.0, data, "ignoring unknown action");
            self.acknowledge(action_id, None).await;
            return Ok(());
        }

        match self.gate.check_authorization(user).await {
            Ok(AuthorizationDecision::Authorized) => {
                tracing::info!(user_id = user.id.0, "access granted");
                self.acknowledge(action_id, None).await;
                self.messenger
                    .send_html(chat_id, &replies::access_granted(), None)
                    .await?;
            }
            Ok(AuthorizationDecision::Unauthorized) => {
                self.acknowledge(action_id, Some(replies::ALERT_JOIN_REQUIRED))
                    .await;
                self.send_join_prompt(chat_id, replies::not_a_member_yet())
                    .await?;
            }
            Err(GateError::CheckFailed(_)) => {
                self.acknowledge(action_id, Some(replies::ALERT_CHECK_FAILED))
                    .await;
                self.messenger
                    .send_html(chat_id, &replies::gate_unverified(), None)
                    .await?;
            }
        }
        Ok(())
    }

    /// Answer the button press. An alert text is shown as a popup.
    /// Failures (e.g. an expired query) are logged and never stop the reply.
    async fn acknowledge(&self, action_id: &str, alert: Option<&str>) {
        if let Err(e) = self
            .messenger
            .answer_action(action_id, alert, alert.is_some())
            .await
        {
            tracing::warn!(action_id, error = %e, "failed to answer action");
        }
    }

    /// Generic apology after a request failed for an unexpected reason.
    pub async fn apologize(&self, chat_id: ChatId) {
        if let Err(e) = self
            .messenger
            .send_html(chat_id, &replies::generic_apology(), None)
            .await
        {
            tracing::warn!(chat_id = chat_id.0, error = %e, "failed to send apology");
        }
    }

    pub async fn on_text(&self, chat_id: ChatId, user: &UserIdentity, text: &str) -> Result<()> {
        self.gated(chat_id, user, QueryInput::Text(text.to_string()))
            .await
    }

    pub async fn on_contact(
        &self,
        chat_id: ChatId,
        user: &UserIdentity,
        contact: SharedContact,
    ) -> Result<()> {
        self.gated(chat_id, user, QueryInput::Contact(contact)).await
    }

    async fn gated(&self, chat_id: ChatId, user: &UserIdentity, input: QueryInput) -> Result<()> {
        match self.gate.check_authorization(user).await {
            Ok(AuthorizationDecision::Authorized) => {}
            Ok(AuthorizationDecision::Unauthorized) => {
                return self.send_join_prompt(chat_id, replies::join_first()).await;
            }
            Err(GateError::CheckFailed(_)) => {
                self.messenger
                    .send_html(chat_id, &replies::gate_unverified(), None)
                    .await?;
                return Ok(());
            }
        }

        let reply = self.dispatcher.handle(input).await;
        self.deliver(chat_id, reply).await
    }

    async fn send_join_prompt(&self, chat_id: ChatId, html: String) -> Result<()> {
        self.messenger
            .send_html(chat_id, &html, Some(replies::join_keyboard(self.channel())))
            .await?;
        Ok(())
    }

    async fn deliver(&self, chat_id: ChatId, reply: Reply) -> Result<()> {
        self.messenger
            .send_html(chat_id, &reply.html, None)
            .await?;

        // Best-effort: a failed photo never turns the request into an error.
        if let Some(follow_up) = reply.follow_up {
            if let Err(e) = self
                .messenger
                .send_html(chat_id, &follow_up.notice, None)
                .await
            {
                tracing::debug!(chat_id = chat_id.0, error = %e, "avatar notice failed");
                return Ok(());
            }
            if let Err(e) = self.messenger.send_photo(chat_id, &follow_up.photo).await {
                tracing::debug!(chat_id = chat_id.0, error = %e, "avatar photo failed");
            }
        }
        Ok(())
    }
}

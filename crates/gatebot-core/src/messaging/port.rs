use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::InlineKeyboard,
    platform::types::ThumbnailRef,
    Result,
};

/// Outbound side of the messenger.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<MessageRef>;

    async fn send_photo(&self, chat_id: ChatId, photo: &ThumbnailRef) -> Result<MessageRef>;

    /// Acknowledge an inline action (removes the client's loading spinner).
    async fn answer_action(
        &self,
        action_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()>;
}

use std::sync::Arc;

use teloxide::prelude::*;

use gatebot_core::domain::ChatId;

use crate::handlers::{identity, report_failure};
use crate::router::AppState;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let cb_id = q.id.clone();
    let chat_id = q.message.as_ref().map(|m| m.chat.id);
    let data = q.data.clone().unwrap_or_default();

    // Always answer callback query eventually.
    let (Some(chat_id), false) = (chat_id, data.is_empty()) else {
        let _ = bot.answer_callback_query(cb_id).await;
        return Ok(());
    };

    let chat_id = ChatId(chat_id.0);
    let identity = identity(&q.from);

    if let Err(e) = state
        .workflow
        .on_action(&cb_id, &data, chat_id, &identity)
        .await
    {
        report_failure(&state, chat_id, identity.id, "callback", e).await;
    }
    Ok(())
}

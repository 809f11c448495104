use std::sync::Arc;

use teloxide::prelude::*;

use gatebot_core::domain::ChatId;

use crate::handlers::{identity, report_failure};
use crate::router::AppState;

fn parse_command(text: &str) -> Option<String> {
    // Telegram may send `/cmd@botname arg1 ...`
    let first = text.trim().split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    Some(name.split('@').next().unwrap_or("").to_lowercase())
}

pub async fn handle_text(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let identity = identity(user);

    let (kind, result) = match parse_command(text).as_deref() {
        Some("start") => ("start", state.workflow.on_start(chat_id, &identity).await),
        _ => ("text", state.workflow.on_text(chat_id, &identity, text).await),
    };

    if let Err(e) = result {
        report_failure(&state, chat_id, identity.id, kind, e).await;
    }
    Ok(())
}

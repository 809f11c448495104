//! Telegram update handlers.
//!
//! Each handler is a small adapter that:
//! - extracts the sender and payload from the teloxide update
//! - hands it to the core `GateWorkflow`
//! - logs workflow failures and attempts a generic apology

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message, User},
};

use gatebot_core::domain::{ChatId, UserId, UserIdentity};

use crate::router::AppState;

mod callback;
mod contact;
mod text;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if msg.text().is_some() {
        return text::handle_text(bot, msg, state).await;
    }

    if msg.contact().is_some() {
        return contact::handle_contact(bot, msg, state).await;
    }

    tracing::debug!(chat_id = msg.chat.id.0, "ignoring unsupported message kind");
    Ok(())
}

pub(crate) fn identity(user: &User) -> UserIdentity {
    identity_from(user.id.0, &user.first_name)
}

fn identity_from(id: u64, first_name: &str) -> UserIdentity {
    let first_name = Some(first_name.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    UserIdentity::new(UserId(id as i64), first_name)
}

/// Log a failed workflow run and try to tell the user something went wrong.
pub(crate) async fn report_failure(
    state: &AppState,
    chat_id: ChatId,
    user_id: UserId,
    kind: &str,
    err: gatebot_core::Error,
) {
    tracing::error!(chat_id = chat_id.0, user_id = user_id.0, kind, error = %err, "handler failed");
    state.workflow.apologize(chat_id).await;
}

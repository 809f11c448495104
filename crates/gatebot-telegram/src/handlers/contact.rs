use std::sync::Arc;

use teloxide::prelude::*;

use gatebot_core::{dispatch::SharedContact, domain::ChatId};

use crate::handlers::{identity, report_failure};
use crate::router::AppState;

pub async fn handle_contact(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(contact) = msg.contact() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let identity = identity(user);
    let shared = SharedContact {
        first_name: contact.first_name.clone(),
        last_name: contact.last_name.clone(),
        phone_number: contact.phone_number.clone(),
    };

    if let Err(e) = state.workflow.on_contact(chat_id, &identity, shared).await {
        report_failure(&state, chat_id, identity.id, "contact", e).await;
    }
    Ok(())
}

//! Telegram update handlers.
//!
//! - `my_chat_member` updates feed the chat tracker
//! - `/command` messages get a static card or live market data
//! - everything else is ignored

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{ChatMemberUpdated, Message},
};

use znnbot_core::domain::ChatId;

use crate::router::AppState;

mod commands;
mod membership;

pub use membership::{membership_event, status_of};

pub async fn handle_my_chat_member(
    upd: ChatMemberUpdated,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let event = membership::membership_event(&upd);
    state.chats.apply(&event).await;
    Ok(())
}

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    commands::handle_command(&state, ChatId(msg.chat.id.0), text).await;
    Ok(())
}

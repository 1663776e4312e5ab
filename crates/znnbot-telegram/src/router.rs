use std::sync::Arc;

use teloxide::{
    dispatching::{DefaultKey, Dispatcher},
    dptree,
    prelude::*,
};

use znnbot_core::{
    commands::BotCommand, config::Config, messaging::port::MessagingPort, tracker::ChatTracker,
};
use znnbot_market::MarketClient;

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub messenger: Arc<dyn MessagingPort>,
    pub market: Arc<MarketClient>,
    pub chats: Arc<ChatTracker>,
}

/// Membership updates and messages, stopped by Ctrl-C.
pub fn build_dispatcher(
    bot: Bot,
    state: Arc<AppState>,
) -> Dispatcher<Bot, teloxide::RequestError, DefaultKey> {
    let handler = dptree::entry()
        .branch(Update::filter_my_chat_member().endpoint(handlers::handle_my_chat_member))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
}

pub async fn run_polling(cfg: Arc<Config>, chats: Arc<ChatTracker>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!("znnbot started: @{}", me.username()),
        Err(e) => tracing::warn!("getMe failed: {e}"),
    }

    // Command menu in Telegram clients (best-effort).
    let menu = BotCommand::ALL
        .into_iter()
        .filter(|c| *c != BotCommand::Help)
        .map(|c| teloxide::types::BotCommand::new(c.name(), c.description()));
    if let Err(e) = bot.set_my_commands(menu).await {
        tracing::warn!("setMyCommands failed: {e}");
    }

    let market = MarketClient::new(
        cfg.price_api_url.clone(),
        cfg.supply_api_url.clone(),
        cfg.http_timeout,
    )?;

    let state = Arc::new(AppState {
        messenger: Arc::new(TelegramMessenger::new(bot.clone())),
        market: Arc::new(market),
        chats: chats.clone(),
    });

    build_dispatcher(bot, state).dispatch().await;

    chats.flush().await?;
    let registry = chats.snapshot().await;
    tracing::info!(
        private_chats = registry.private_chat_ids().len(),
        groups = registry.group_ids().len(),
        channels = registry.channel_ids().len(),
        "znnbot stopped"
    );

    Ok(())
}

use znnbot_core::{
    commands::{parse_command, BotCommand},
    domain::ChatId,
    Result,
};
use znnbot_market::{format_market_caps, format_prices, format_supplies, MARKET_UNAVAILABLE};

use crate::router::AppState;

/// Reply to a `/command` message. Unknown commands and plain text are ignored.
pub(crate) async fn handle_command(state: &AppState, chat_id: ChatId, text: &str) {
    let Some((name, _args)) = parse_command(text) else {
        return;
    };
    let Some(cmd) = BotCommand::from_name(&name) else {
        return;
    };

    let reply = match cmd.static_reply() {
        Some(html) => html,
        None => market_reply(state, cmd).await.unwrap_or_else(|e| {
            tracing::warn!(command = cmd.name(), "market data fetch failed: {e}");
            MARKET_UNAVAILABLE.to_string()
        }),
    };

    if let Err(e) = state.messenger.send_html(chat_id, &reply).await {
        tracing::warn!(%chat_id, command = cmd.name(), "failed to send reply: {e}");
    }
}

async fn market_reply(state: &AppState, cmd: BotCommand) -> Result<String> {
    Ok(match cmd {
        BotCommand::Price => format_prices(&state.market.fetch_prices().await?),
        BotCommand::Supply => format_supplies(&state.market.fetch_supplies().await?),
        _ => format_market_caps(&state.market.fetch_market_caps().await?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{sync::Arc, time::Duration};

    use znnbot_core::{
        messaging::recording::RecordingMessenger, registry::MembershipRegistry, tracker::ChatTracker,
    };
    use znnbot_market::MarketClient;

    fn state_with(messenger: Arc<RecordingMessenger>, market_url: &str) -> AppState {
        AppState {
            messenger,
            market: Arc::new(
                MarketClient::new(market_url, market_url, Duration::from_millis(500)).unwrap(),
            ),
            chats: Arc::new(ChatTracker::in_memory(MembershipRegistry::new())),
        }
    }

    #[tokio::test]
    async fn static_command_sends_card() {
        let messenger = Arc::new(RecordingMessenger::new());
        let state = state_with(messenger.clone(), "http://127.0.0.1:9/");

        handle_command(&state, ChatId(10), "/github@ZenonBot").await;

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, ChatId(10));
        assert!(sent[0].1.contains("<b>Github Repositories</b>"));
    }

    #[tokio::test]
    async fn unknown_commands_and_text_are_ignored() {
        let messenger = Arc::new(RecordingMessenger::new());
        let state = state_with(messenger.clone(), "http://127.0.0.1:9/");

        handle_command(&state, ChatId(10), "/moon").await;
        handle_command(&state, ChatId(10), "gm everyone").await;

        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn market_failure_replies_with_notice() {
        let messenger = Arc::new(RecordingMessenger::new());
        // Port 9 (discard) is closed on test machines; the request fails fast.
        let state = state_with(messenger.clone(), "http://127.0.0.1:9/price");

        handle_command(&state, ChatId(3), "/price").await;

        assert_eq!(
            messenger.sent(),
            vec![(ChatId(3), MARKET_UNAVAILABLE.to_string())]
        );
    }
}

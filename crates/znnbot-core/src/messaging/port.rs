use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    Result,
};

/// Outbound messaging port.
///
/// Telegram is the only implementation; handlers depend on this trait so
/// replies can be captured in tests.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Send an HTML message with link previews disabled.
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef>;
}

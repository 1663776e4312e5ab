use std::sync::Arc;

use znnbot_core::{config::Config, tracker::ChatTracker};

#[tokio::main]
async fn main() -> Result<(), znnbot_core::Error> {
    znnbot_core::logging::init("znnbot")?;

    let cfg = Arc::new(Config::load()?);
    let chats = Arc::new(ChatTracker::open(cfg.registry_file.clone())?);

    znnbot_telegram::router::run_polling(cfg, chats)
        .await
        .map_err(|e| znnbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}

//! Messenger abstraction (Telegram adapter lives in `znnbot-telegram`).

pub mod port;
pub mod recording;

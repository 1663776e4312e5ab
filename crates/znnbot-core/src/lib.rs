//! Core domain + application logic for the Zenon community Telegram bot.
//!
//! This crate is framework-agnostic. Telegram and the market data HTTP APIs
//! live behind adapter crates.

pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod membership;
pub mod messaging;
pub mod registry;
pub mod tracker;
pub mod utils;

pub use errors::{Error, Result};

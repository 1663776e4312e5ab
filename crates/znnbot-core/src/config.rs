use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

pub const DEFAULT_PRICE_API_URL: &str = "https://api.hc1.tools/price";
pub const DEFAULT_SUPPLY_API_URL: &str =
    "https://zenonhub.io/api/nom/token/get-by-owner?address=z1qxemdeddedxt0kenxxxxxxxxxxxxxxxxh9amk0";
const DEFAULT_REGISTRY_FILE: &str = "/tmp/znnbot-chats.json";

/// Typed configuration, read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// `None` keeps the chat registry in memory only.
    pub registry_file: Option<PathBuf>,

    // Market data
    pub price_api_url: String,
    pub supply_api_url: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .or_else(|| lookup("TOKEN").and_then(non_empty))
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        // Empty value disables persistence.
        let registry_file = match lookup("CHAT_REGISTRY_FILE") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(PathBuf::from(v.trim())),
            None => Some(PathBuf::from(DEFAULT_REGISTRY_FILE)),
        };

        let price_api_url = lookup("PRICE_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_PRICE_API_URL.to_string());
        let supply_api_url = lookup("SUPPLY_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_SUPPLY_API_URL.to_string());

        let http_timeout = Duration::from_millis(
            lookup("HTTP_TIMEOUT_MS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(10_000),
        );

        Ok(Self {
            telegram_bot_token,
            registry_file,
            price_api_url,
            supply_api_url,
            http_timeout,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

//! Base config: Telegram Bot connection and logging. Loaded from env.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/oracle-bot.log";

/// Base config: Telegram-related and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN or TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
                .context("BOT_TOKEN (or TELEGRAM_BOT_TOKEN) not set")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

//! Bot configuration: BaseConfig (Telegram + log) + OracleSettings (Nikta API, report channel, pacing).

mod base;
mod bot_config;
mod oracle;


pub use base::{BaseConfig, DEFAULT_LOG_FILE};
pub use bot_config::BotConfig;
pub use oracle::OracleSettings;

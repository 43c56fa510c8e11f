//! BotConfig: BaseConfig + OracleSettings. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, OracleSettings};

/// Bot config: Telegram connection plus oracle settings.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub oracle: OracleSettings,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let oracle = OracleSettings::from_env()?;
        Ok(Self { base, oracle })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.oracle.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn oracle(&self) -> &OracleSettings {
        &self.oracle
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}

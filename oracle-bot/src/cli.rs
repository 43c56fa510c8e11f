//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "oracle-bot")]
#[command(about = "Nikta Oracle Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot with long polling (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Delete the registered webhook and drop pending updates.
    ResetWebhook {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["oracle-bot", "run", "--token", "abc"]).unwrap();
        match cli.command {
            Commands::Run { token } => assert_eq!(token.as_deref(), Some("abc")),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_reset_webhook() {
        let cli = Cli::try_parse_from(["oracle-bot", "reset-webhook"]).unwrap();
        assert!(matches!(cli.command, Commands::ResetWebhook { token: None }));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["oracle-bot"]).is_err());
    }
}

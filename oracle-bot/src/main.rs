//! Binary for the Nikta Oracle bot.

use anyhow::{Context, Result};
use clap::Parser;
use oracle_bot::{
    build_teloxide_bot, load_config, reset_webhook, run_bot, BaseConfig, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::ResetWebhook { token } => {
            let base = BaseConfig::load(token)?;
            base.validate()?;
            let bot = build_teloxide_bot(&base);
            reset_webhook(&bot).await.context("webhook reset failed")?;
            println!("Webhook deleted, pending updates dropped.");
            Ok(())
        }
    }
}

use anyhow::Result;
use nikta_client::CompletionGateway;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot, Message};
use crate::telegram::run_repl;

use super::components::{build_bot_components, build_handler_chain, BotComponents};

/// OracleBot: config, components, and handler chain.
pub struct OracleBot {
    pub config: BotConfig,
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
}

impl OracleBot {
    /// Builds the bot against Telegram and the Nikta API.
    pub fn new(config: BotConfig) -> Result<Self> {
        Self::with_overrides(config, None, None)
    }

    /// Builds the bot with a substitute transport and/or completion gateway (tests).
    pub fn with_overrides(
        config: BotConfig,
        bot_override: Option<Arc<dyn Bot>>,
        gateway_override: Option<Arc<dyn CompletionGateway>>,
    ) -> Result<Self> {
        let components = build_bot_components(&config, bot_override, gateway_override)?;
        let handler_chain = build_handler_chain(&components);
        Ok(Self {
            config,
            components,
            handler_chain,
        })
    }

    /// Drive handler chain with core Message (for integration tests).
    #[doc(hidden)]
    pub async fn handle_core_message(&self, message: &Message) -> Result<()> {
        info!(
            user_id = message.user.id,
            message_content = %message.content,
            "Handling core message"
        );
        if let Err(e) = self.handler_chain.handle(message).await {
            error!(error = %e, user_id = message.user.id, "Handler chain failed");
        }
        Ok(())
    }
}

/// Main entry: validate config, init logging, build components, then run REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        report_channel_id = config.oracle().report_channel_id,
        api_url = %config.oracle().api_url,
        "Initializing bot"
    );

    let bot = OracleBot::new(config)?;
    let teloxide_bot = bot.components.teloxide_bot.clone();

    info!("Bot started successfully");

    run_repl(teloxide_bot, bot.handler_chain).await?;

    Ok(())
}

//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::Result;
use nikta_client::{CompletionGateway, NiktaClient};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::{BaseConfig, BotConfig};
use crate::core::Bot as CoreBot;
use crate::flow::FlowEngine;
use crate::handlers::{LoggingHandler, OracleFlowHandler};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot / OracleBot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Outbound side used by the flow (the Telegram adapter, or a test double).
    pub bot: Arc<dyn CoreBot>,
    pub gateway: Arc<dyn CompletionGateway>,
    pub engine: Arc<FlowEngine>,
}

/// teloxide Bot for the token, pointed at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &BaseConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url.as_deref() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds BotComponents. Overrides replace the Telegram adapter and the Nikta client (tests).
#[instrument(skip(config, bot_override, gateway_override))]
pub fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn CoreBot>>,
    gateway_override: Option<Arc<dyn CompletionGateway>>,
) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config.base());

    let bot: Arc<dyn CoreBot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let gateway: Arc<dyn CompletionGateway> = match gateway_override {
        Some(gateway) => gateway,
        None => {
            let nikta = config.oracle().nikta_config();
            info!(
                run_url = %nikta.run_url,
                login_url = %nikta.login_url,
                llm_model = %nikta.llm_model,
                "Using Nikta completion API"
            );
            Arc::new(NiktaClient::new(nikta).map_err(|e| {
                error!(error = %e, "Failed to build Nikta client");
                anyhow::anyhow!("Failed to build Nikta client: {}", e)
            })?)
        }
    };

    let engine = Arc::new(FlowEngine::new(
        bot.clone(),
        gateway.clone(),
        config.oracle().flow_settings(),
    ));

    Ok(BotComponents {
        teloxide_bot,
        bot,
        gateway,
        engine,
    })
}

/// Builds the handler chain (logging → oracle flow).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler::new()))
        .add_handler(Arc::new(OracleFlowHandler::new(components.engine.clone())))
}

//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;
use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts the long-polling REPL. Each message is converted to core::Message and handled in its
/// own task; per-user ordering is enforced by the session lock further down.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                "Received message"
            );

            tokio::spawn(async move {
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    "step: processing message (handler chain started)"
                );
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}

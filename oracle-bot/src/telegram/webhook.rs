//! Maintenance: clear a registered webhook so long polling can take over.

use anyhow::{Context, Result};
use teloxide::prelude::*;
use tracing::info;

/// Deletes the webhook and drops every update queued on Telegram's side.
pub async fn reset_webhook(bot: &teloxide::Bot) -> Result<()> {
    bot.delete_webhook()
        .drop_pending_updates(true)
        .await
        .context("deleteWebhook failed")?;
    info!("Webhook deleted, pending updates dropped");
    Ok(())
}

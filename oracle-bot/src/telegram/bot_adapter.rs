//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use crate::core::{
    parse_message_id, Bot as CoreBot, Chat, KeyButton, OracleError, OutgoingMessage, ReplyMarkup,
    Result,
};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ButtonRequest, ChatId, KeyboardButton, KeyboardMarkup, KeyboardRemove, LinkPreviewOptions,
    MessageId, ParseMode,
};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Resized one-time reply keyboard.
fn keyboard(rows: &[Vec<KeyButton>]) -> KeyboardMarkup {
    KeyboardMarkup::new(rows.iter().map(|row| row.iter().map(button).collect::<Vec<_>>()))
        .resize_keyboard()
        .one_time_keyboard()
}

fn button(key: &KeyButton) -> KeyboardButton {
    let button = KeyboardButton::new(key.text.clone());
    if key.request_contact {
        button.request(ButtonRequest::Contact)
    } else {
        button
    }
}

fn disabled_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String> {
        let mut request = self.bot.send_message(ChatId(chat.id), message.text.clone());
        if message.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if !message.link_preview {
            request = request.link_preview_options(disabled_link_preview());
        }
        request = match &message.markup {
            ReplyMarkup::Unchanged => request,
            ReplyMarkup::Keyboard(rows) => request.reply_markup(keyboard(rows)),
            ReplyMarkup::Remove => request.reply_markup(KeyboardRemove::new()),
        };

        let sent = request.await.map_err(|e| OracleError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(|e| OracleError::Bot(e.to_string()))?;
        Ok(())
    }
}

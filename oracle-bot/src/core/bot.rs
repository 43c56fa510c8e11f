//! Bot abstraction for sending and deleting messages.
//!
//! [`Bot`] is transport-agnostic; [`crate::telegram::TelegramBotAdapter`] implements it via teloxide,
//! tests substitute a recording implementation.

use async_trait::async_trait;

use super::error::{OracleError, Result};
use super::types::{Chat, OutgoingMessage};

/// Outbound side of the transport. Message ids are transport-specific strings (Telegram: numeric).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a message (text, markup, formatting) to the chat and returns the new message id.
    async fn send_message(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String>;

    /// Deletes a previously sent or received message.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| OracleError::Bot(format!("Invalid message_id: {}", s)))
}

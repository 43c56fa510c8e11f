//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// Phone number shared through the transport's native contact button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub phone_number: String,
}

/// A single inbound message: sender, chat, text content, optional shared contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text; empty for non-text updates.
    pub content: String,
    /// `text`, `contact` or `other`.
    pub message_type: String,
    pub created_at: DateTime<Utc>,
    pub contact: Option<ContactPayload>,
}

impl Message {
    /// Builds a text message (keyboard presses arrive this way too).
    pub fn text(id: impl Into<String>, user: User, chat: Chat, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: content.into(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
            contact: None,
        }
    }

    /// Builds a contact-sharing message.
    pub fn contact(id: impl Into<String>, user: User, chat: Chat, phone_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: String::new(),
            message_type: "contact".to_string(),
            created_at: Utc::now(),
            contact: Some(ContactPayload {
                phone_number: phone_number.into(),
            }),
        }
    }
}

use crate::core::{Chat, ContactPayload, Message, ToCoreMessage, ToCoreUser, User};

/// Converts a Telegram user into the core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Converts a Telegram message into the core message. Shared contacts become [`ContactPayload`];
/// a message without sender maps to user id 0.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let contact = self.0.contact().map(|c| ContactPayload {
            phone_number: c.phone_number.clone(),
        });
        let message_type = if contact.is_some() {
            "contact"
        } else if self.0.text().is_some() {
            "text"
        } else {
            "other"
        };

        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: self.chat_type().to_string(),
            },
            content: self.0.text().unwrap_or("").to_string(),
            message_type: message_type.to_string(),
            created_at: chrono::Utc::now(),
            contact,
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn chat_type(&self) -> &'static str {
        let chat = &self.0.chat;
        if chat.is_private() {
            "private"
        } else if chat.is_channel() {
            "channel"
        } else {
            "group"
        }
    }
}

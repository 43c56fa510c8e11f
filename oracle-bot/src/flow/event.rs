//! Classification of an inbound message into a flow event.

use crate::core::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    Cancel,
    /// Plain text or a keyboard press, verbatim.
    Text(String),
    /// Phone number shared through the contact button.
    Contact(String),
    /// Unknown commands, empty and non-text updates.
    Ignored,
}

impl Event {
    pub fn from_message(message: &Message) -> Self {
        if let Some(contact) = &message.contact {
            return Event::Contact(contact.phone_number.clone());
        }
        let text = message.content.as_str();
        if text.is_empty() {
            return Event::Ignored;
        }
        if let Some(command) = text.strip_prefix('/') {
            let command = command.split_whitespace().next().unwrap_or_default();
            let command = command.split('@').next().unwrap_or_default();
            return match command {
                "start" => Event::Start,
                "cancel" => Event::Cancel,
                _ => Event::Ignored,
            };
        }
        Event::Text(text.to_string())
    }
}

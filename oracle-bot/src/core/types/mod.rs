//! Core types: user, chat, inbound message, outbound message, handler response, and Handler trait.
//!
//! One file per main type.

mod chat;
mod handler;
mod message;
mod outgoing;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::{ContactPayload, Message};
pub use outgoing::{KeyButton, OutgoingMessage, ReplyMarkup};
pub use response::HandlerResponse;
pub use user::User;

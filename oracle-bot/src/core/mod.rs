//! Core types and traits: Handler, Bot, Message, OutgoingMessage, error, logger.
//! Transport-agnostic; the teloxide binding lives in [`crate::telegram`].

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{HandlerError, OracleError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, ContactPayload, Handler, HandlerResponse, KeyButton, Message, OutgoingMessage,
    ReplyMarkup, ToCoreMessage, ToCoreUser, User,
};

//! Telegram framework layer: adapters, Bot implementation, REPL runner, webhook maintenance.

mod adapters;
mod bot_adapter;
mod runner;
mod webhook;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_repl;
pub use webhook::reset_webhook;

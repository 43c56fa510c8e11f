//! # Nikta Oracle bot
//!
//! Telegram bot that turns a prediction card into a short AI consultation and a lead for the
//! Nikta.ai team. Loads config from env and runs the REPL.
//!
//! - [`core`]: transport-agnostic types, the [`Bot`] trait, errors, tracing setup.
//! - [`flow`]: the conversation state machine ([`FlowEngine`]) and its per-user sessions.
//! - [`chain`] and [`handlers`]: the handler chain the Telegram runner feeds.
//! - [`telegram`]: teloxide adapters, REPL runner, webhook maintenance.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod flow;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, parse_message_id, Bot, Chat, ContactPayload, Handler, HandlerError,
    HandlerResponse, KeyButton, Message, OracleError, OutgoingMessage, ReplyMarkup, Result,
    ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{
    reset_webhook, run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper,
};

pub use config::{BaseConfig, BotConfig, OracleSettings};
pub use flow::{ConversationState, FlowEngine, FlowSettings, SessionStore, UserSession};
pub use runner::{run_bot, OracleBot};

pub use components::{build_bot_components, build_handler_chain, build_teloxide_bot, BotComponents};
pub use handlers::{LoggingHandler, OracleFlowHandler};

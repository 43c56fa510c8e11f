//! Error types for the bot core.
//!
//! [`OracleError`] is the top-level error; [`HandlerError`] is used for handler failures.
//! User input mistakes are never errors: the flow re-prompts instead.

use thiserror::Error;

/// Top-level error (bot transport, handler, IO).
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Update carried no sender, so no session can be addressed.
    #[error("Message has no sender")]
    NoSender,
}

/// Result type for core operations; uses [`OracleError`].
pub type Result<T> = std::result::Result<T, OracleError>;

//! # Nikta client
//!
//! Talks to the Nikta scenario API used by the oracle bot:
//!
//! - [`NiktaClient`] exchanges credentials for a bearer token and submits one user turn to the
//!   completion endpoint, returning the raw JSON payload. Every call logs in again; tokens are not cached.
//! - [`parse_reply`] splits a completion payload into the ordered list of chat messages to deliver.
//! - [`CompletionGateway`] is the seam the bot depends on, so flows can be tested without HTTP.
//!
//! ## Example
//!
//! ```rust,no_run
//! use nikta_client::{parse_reply, CompletionGateway, NiktaClient, NiktaConfig};
//!
//! async fn ask(dialog_id: &str) -> Result<Vec<String>, nikta_client::GatewayError> {
//!     let config = NiktaConfig::new("admin@example.com", "secret");
//!     let client = NiktaClient::new(config)?;
//!     let payload = client.complete(dialog_id, "Предсказание: Х2 средний чек, Сфера: 💼 IT / Маркетинг").await?;
//!     Ok(parse_reply(&payload))
//! }
//! ```

mod client;
mod config;
mod error;
mod reply;

pub use client::{CompletionGateway, NiktaClient};
pub use config::{
    NiktaConfig, CHANNEL_ID, DEFAULT_LLM_MODEL, DEFAULT_LOGIN_URL, DEFAULT_RUN_URL,
    REQUEST_TIMEOUT_SECS, SCENARIO_ID,
};
pub use error::GatewayError;
pub use reply::{parse_reply, EMPTY_REPLY_FALLBACK};

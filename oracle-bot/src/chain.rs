//! # Handler chain
//!
//! Runs a sequence of handlers for one inbound update. All `before` run in order (any false
//! stops the chain), then `handle` runs until one returns Stop, then all `after` run in reverse.

use crate::core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the three phases for `message` and returns the final response.
    #[instrument(skip(self, message), fields(user_id = message.user.id, message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        debug!(chat_id = message.chat.id, "step: handler_chain started");

        for h in &self.handlers {
            if !h.before(message).await? {
                info!(handler = %h.name(), "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let response = h.handle(message).await?;
            debug!(handler = %h.name(), response = ?response, "step: handler handle done");
            if response == HandlerResponse::Stop {
                final_response = response;
                break;
            }
            if response == HandlerResponse::Ignore {
                final_response = HandlerResponse::Ignore;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        debug!(response = ?final_response, "step: handler_chain finished");
        Ok(final_response)
    }
}

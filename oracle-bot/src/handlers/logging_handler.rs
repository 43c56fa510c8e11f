//! Logs every inbound message before the flow runs and the chain outcome after it.

use crate::core::{Handler, HandlerResponse, Message, Result};
use async_trait::async_trait;
use tracing::{debug, info};

#[derive(Clone, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LoggingHandler {
    fn name(&self) -> &'static str {
        "LoggingHandler"
    }

    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = ?message.user.username,
            chat_id = message.chat.id,
            message_id = %message.id,
            message_type = %message.message_type,
            content = %message.content,
            "step: LoggingHandler before"
        );
        Ok(true)
    }

    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            user_id = message.user.id,
            message_id = %message.id,
            response = ?response,
            "step: LoggingHandler after"
        );
        Ok(())
    }
}

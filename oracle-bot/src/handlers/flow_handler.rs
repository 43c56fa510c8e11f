//! # Oracle flow handler
//!
//! Terminal chain handler: hands every message to [`FlowEngine`]. Stops the chain when the flow
//! consumed the message, otherwise reports Ignore.

use crate::core::{Handler, HandlerError, HandlerResponse, Message, Result};
use crate::flow::FlowEngine;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct OracleFlowHandler {
    engine: Arc<FlowEngine>,
}

impl OracleFlowHandler {
    pub fn new(engine: Arc<FlowEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<FlowEngine> {
        &self.engine
    }
}

#[async_trait]
impl Handler for OracleFlowHandler {
    fn name(&self) -> &'static str {
        "OracleFlowHandler"
    }

    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.user.id == 0 {
            return Err(HandlerError::NoSender.into());
        }
        match self.engine.dispatch(message).await? {
            Some(state) => {
                debug!(user_id = message.user.id, state = %state, "step: OracleFlowHandler handled");
                Ok(HandlerResponse::Stop)
            }
            None => Ok(HandlerResponse::Ignore),
        }
    }
}

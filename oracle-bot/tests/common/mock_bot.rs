//! Test doubles for the flow: a recording [`Bot`] and a scripted [`CompletionGateway`].

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nikta_client::{CompletionGateway, GatewayError};
use oracle_bot::{Bot, Chat, OracleError, OutgoingMessage, Result};
use serde_json::{json, Value};

/// One message the bot sent.
#[derive(Debug, Clone)]
pub struct Sent {
    pub chat_id: i64,
    pub id: String,
    pub message: OutgoingMessage,
}

/// Records sends and deletions. Message ids start at 1000 so they never collide with user ids.
#[derive(Debug)]
pub struct RecordingBot {
    next_id: AtomicUsize,
    sent: Mutex<Vec<Sent>>,
    deleted: Mutex<Vec<String>>,
    fail_deletes: AtomicBool,
    /// Sends to this chat id fail; 0 disables.
    fail_chat: AtomicI64,
    /// The next send with this text fails once.
    fail_once: Mutex<Option<String>>,
}

impl Default for RecordingBot {
    fn default() -> Self {
        Self {
            next_id: AtomicUsize::new(1000),
            sent: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            fail_deletes: AtomicBool::new(false),
            fail_chat: AtomicI64::new(0),
            fail_once: Mutex::new(None),
        }
    }
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| s.chat_id == chat_id)
            .collect()
    }

    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent_to(chat_id)
            .into_iter()
            .map(|s| s.message.text)
            .collect()
    }

    pub fn last_to(&self, chat_id: i64) -> Option<Sent> {
        self.sent_to(chat_id).pop()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sends_to(&self, chat_id: i64) {
        self.fail_chat.store(chat_id, Ordering::SeqCst);
    }

    pub fn fail_next_send_of(&self, text: &str) {
        *self.fail_once.lock().unwrap() = Some(text.to_string());
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, message: &OutgoingMessage) -> Result<String> {
        if chat.id == self.fail_chat.load(Ordering::SeqCst) {
            return Err(OracleError::Bot("Forbidden: bot is not a member of the channel".into()));
        }
        {
            let mut fail_once = self.fail_once.lock().unwrap();
            if fail_once.as_deref() == Some(message.text.as_str()) {
                *fail_once = None;
                return Err(OracleError::Bot("Too Many Requests: retry after 1".into()));
            }
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            id: id.clone(),
            message: message.clone(),
        });
        Ok(id)
    }

    async fn delete_message(&self, _chat: &Chat, message_id: &str) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(OracleError::Bot("Bad Request: message to delete not found".into()));
        }
        self.deleted.lock().unwrap().push(message_id.to_string());
        Ok(())
    }
}

/// Returns queued results in order, then a single-segment default reply.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<std::result::Result<Value, GatewayError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: std::result::Result<Value, GatewayError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// `(dialog_id, content)` of every call.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(
        &self,
        dialog_id: &str,
        content: &str,
    ) -> std::result::Result<Value, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((dialog_id.to_string(), content.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"result": "<br>Оракул отвечает</br>"})))
    }
}

//! Per-user session record.

use uuid::Uuid;

use super::state::ConversationState;

/// One {prediction, sphere} pair that reached the chat step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRecord {
    pub prediction: String,
    pub sphere: String,
}

/// Everything the flow knows about one user. Replaced wholesale on `/start`; never persisted.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub state: ConversationState,
    /// Correlation id sent to the completion API; new per attempt.
    pub dialog_id: String,
    pub prediction: Option<String>,
    pub sphere: Option<String>,
    pub name: Option<String>,
    /// `Телефон: ...` or `Email: ...`.
    pub contact: Option<String>,
    /// Last prompt shown; deleted on the next valid transition.
    pub last_prompt_id: Option<String>,
    /// Rejected inputs and re-prompts waiting for the next valid transition.
    pub pending_cleanup: Vec<String>,
    /// Append-only across attempts.
    pub history: Vec<PredictionRecord>,
    pub completed: bool,
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UserSession {
    pub fn new() -> Self {
        Self {
            state: ConversationState::ChoosingPrediction,
            dialog_id: new_dialog_id(),
            prediction: None,
            sphere: None,
            name: None,
            contact: None,
            last_prompt_id: None,
            pending_cleanup: Vec::new(),
            history: Vec::new(),
            completed: false,
        }
    }

    /// Starts another attempt inside the same session: new dialog id, choices cleared, history kept.
    pub fn new_attempt(&mut self) {
        self.dialog_id = new_dialog_id();
        self.prediction = None;
        self.sphere = None;
    }

    /// Appends the current prediction and sphere to the history.
    pub fn record_attempt(&mut self) {
        self.history.push(PredictionRecord {
            prediction: self.prediction.clone().unwrap_or_default(),
            sphere: self.sphere.clone().unwrap_or_default(),
        });
    }

    pub fn queue_cleanup(&mut self, message_id: impl Into<String>) {
        self.pending_cleanup.push(message_id.into());
    }

    /// Takes the last prompt id followed by every queued id, leaving both empty.
    pub fn take_cleanup(&mut self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.pending_cleanup.len() + 1);
        ids.extend(self.last_prompt_id.take());
        ids.append(&mut self.pending_cleanup);
        ids
    }
}

fn new_dialog_id() -> String {
    Uuid::new_v4().to_string()
}

//! In-memory session store keyed by user id.
//!
//! Each session sits behind its own async mutex; a turn holds it for its whole duration,
//! so updates for one user are processed one at a time even when the runner spawns them concurrently.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::session::UserSession;

/// Shared handle to one user's session.
pub type SessionHandle = Arc<Mutex<UserSession>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<i64, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards any existing session for `user_id` and installs a fresh one.
    pub fn reset(&self, user_id: i64) -> SessionHandle {
        let handle = Arc::new(Mutex::new(UserSession::new()));
        self.sessions.insert(user_id, handle.clone());
        handle
    }

    pub fn get(&self, user_id: i64) -> Option<SessionHandle> {
        self.sessions.get(&user_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

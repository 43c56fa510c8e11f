//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// User identity (platform id, handle, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// `@username`, or `None` when the user has no public handle.
    pub fn handle(&self) -> Option<String> {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| format!("@{}", name))
    }
}

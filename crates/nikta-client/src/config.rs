//! Endpoint, credential and request constants for the Nikta API.

use std::time::Duration;

/// Completion endpoint used when `API_URL` is not set.
pub const DEFAULT_RUN_URL: &str = "http://demo.nikta.ai/llm/api/run";
/// Login endpoint used when `API_LOGIN_URL` is not set.
pub const DEFAULT_LOGIN_URL: &str = "https://demo.nikta.ai/llm/api/login";
/// Model requested for every completion.
pub const DEFAULT_LLM_MODEL: &str = "anthropic/claude-sonnet-4";
/// Scenario the bot runs on the Nikta side.
pub const SCENARIO_ID: &str = "conf-bot";
/// Channel identifier sent with every completion.
pub const CHANNEL_ID: &str = "1";
/// Applies to both the login and the completion request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`crate::NiktaClient`].
#[derive(Debug, Clone)]
pub struct NiktaConfig {
    pub login_url: String,
    pub run_url: String,
    pub email: String,
    pub password: String,
    pub llm_model: String,
    pub timeout: Duration,
}

impl NiktaConfig {
    /// Default endpoints and model with the given credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            run_url: DEFAULT_RUN_URL.to_string(),
            email: email.into(),
            password: password.into(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = url.into();
        self
    }

    pub fn with_run_url(mut self, url: impl Into<String>) -> Self {
        self.run_url = url.into();
        self
    }

    pub fn with_llm_model(mut self, model: impl Into<String>) -> Self {
        self.llm_model = model.into();
        self
    }
}

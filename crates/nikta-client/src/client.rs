//! HTTP client for the Nikta login and completion endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::config::{NiktaConfig, CHANNEL_ID, SCENARIO_ID};
use crate::error::GatewayError;

/// Submits one user turn of a dialog and returns the raw reply payload.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends `content` as the single user message of dialog `dialog_id`.
    async fn complete(&self, dialog_id: &str, content: &str) -> Result<Value, GatewayError>;
}

/// Nikta API client. Logs in before every completion; no token is kept between calls.
#[derive(Debug, Clone)]
pub struct NiktaClient {
    client: Client,
    config: NiktaConfig,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    scenario_id: &'a str,
    state: RunState<'a>,
    channel_id: &'a str,
    dialog_id: &'a str,
    llm_model: &'a str,
}

#[derive(Debug, Serialize)]
struct RunState<'a> {
    messages: Vec<ChatTurn<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatTurn<'a> {
    role: &'a str,
    content: &'a str,
}

impl NiktaClient {
    /// Builds the client with the configured request timeout.
    pub fn new(config: NiktaConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &NiktaConfig {
        &self.config
    }

    /// Exchanges the configured credentials for a bearer token.
    ///
    /// Any failure (transport, non-2xx, missing `token` field) is logged and yields an empty string.
    #[instrument(skip(self))]
    pub async fn fetch_token(&self) -> String {
        match self.request_token().await {
            Ok(token) if token.is_empty() => {
                error!("Token not found in login response");
                token
            }
            Ok(token) => {
                debug!("step: login succeeded");
                token
            }
            Err(e) => {
                error!(error = %e, login_url = %self.config.login_url, "Error getting auth token");
                String::new()
            }
        }
    }

    async fn request_token(&self) -> Result<String, reqwest::Error> {
        let body = LoginRequest {
            email: &self.config.email,
            password: &self.config.password,
        };
        let payload: Value = self
            .client
            .post(&self.config.login_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload
            .get("token")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl CompletionGateway for NiktaClient {
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn complete(&self, dialog_id: &str, content: &str) -> Result<Value, GatewayError> {
        let token = self.fetch_token().await;
        if token.is_empty() {
            return Err(GatewayError::Unauthorized);
        }

        let request = RunRequest {
            scenario_id: SCENARIO_ID,
            state: RunState {
                messages: vec![ChatTurn {
                    role: "user",
                    content,
                }],
            },
            channel_id: CHANNEL_ID,
            dialog_id,
            llm_model: &self.config.llm_model,
        };

        info!(dialog_id = %dialog_id, model = %self.config.llm_model, "step: completion request");

        let response = self
            .client
            .post(&self.config.run_url)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, dialog_id = %dialog_id, "API request error");
                GatewayError::Completion(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_text, dialog_id = %dialog_id, "API request error");
            return Err(GatewayError::Completion(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!(error = %e, dialog_id = %dialog_id, "API response is not JSON");
            GatewayError::Completion(e.to_string())
        })?;

        debug!(dialog_id = %dialog_id, payload = %payload, "API response");
        Ok(payload)
    }
}

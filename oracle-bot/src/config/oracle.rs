//! Oracle settings: Nikta API access, operator channel, reply pacing. Loaded from env.

use anyhow::{Context, Result};
use nikta_client::{NiktaConfig, DEFAULT_LLM_MODEL, DEFAULT_LOGIN_URL, DEFAULT_RUN_URL};
use std::env;
use std::time::Duration;

use crate::flow::{
    FlowSettings, DEFAULT_GREETING_DELAY_MS, DEFAULT_REPORT_CHANNEL_ID, DEFAULT_SEGMENT_DELAY_MS,
};

#[derive(Debug, Clone)]
pub struct OracleSettings {
    /// API_URL
    pub api_url: String,
    /// API_LOGIN_URL
    pub api_login_url: String,
    /// API_EMAIL
    pub api_email: String,
    /// API_PASSWORD
    pub api_password: String,
    /// LLM_MODEL
    pub llm_model: String,
    /// REPORT_CHANNEL_ID
    pub report_channel_id: i64,
    /// SEGMENT_DELAY_MS
    pub segment_delay_ms: u64,
    /// GREETING_DELAY_MS
    pub greeting_delay_ms: u64,
}

impl OracleSettings {
    pub fn from_env() -> Result<Self> {
        let api_email = env::var("API_EMAIL").context("API_EMAIL not set")?;
        let api_password = env::var("API_PASSWORD").context("API_PASSWORD not set")?;
        let report_channel_id = match env::var("REPORT_CHANNEL_ID") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("REPORT_CHANNEL_ID is not a chat id: {}", raw))?,
            Err(_) => DEFAULT_REPORT_CHANNEL_ID,
        };

        Ok(Self {
            api_url: env::var("API_URL").unwrap_or_else(|_| DEFAULT_RUN_URL.to_string()),
            api_login_url: env::var("API_LOGIN_URL")
                .unwrap_or_else(|_| DEFAULT_LOGIN_URL.to_string()),
            api_email,
            api_password,
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            report_channel_id,
            segment_delay_ms: millis_from_env("SEGMENT_DELAY_MS", DEFAULT_SEGMENT_DELAY_MS),
            greeting_delay_ms: millis_from_env("GREETING_DELAY_MS", DEFAULT_GREETING_DELAY_MS),
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("API_URL", &self.api_url), ("API_LOGIN_URL", &self.api_login_url)] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        if self.api_email.trim().is_empty() {
            anyhow::bail!("API_EMAIL is empty");
        }
        if self.api_password.is_empty() {
            anyhow::bail!("API_PASSWORD is empty");
        }
        if self.llm_model.trim().is_empty() {
            anyhow::bail!("LLM_MODEL is empty");
        }
        Ok(())
    }

    pub fn nikta_config(&self) -> NiktaConfig {
        NiktaConfig::new(self.api_email.clone(), self.api_password.clone())
            .with_login_url(self.api_login_url.clone())
            .with_run_url(self.api_url.clone())
            .with_llm_model(self.llm_model.clone())
    }

    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            report_channel_id: self.report_channel_id,
            segment_delay: Duration::from_millis(self.segment_delay_ms),
            greeting_delay: Duration::from_millis(self.greeting_delay_ms),
        }
    }
}

fn millis_from_env(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

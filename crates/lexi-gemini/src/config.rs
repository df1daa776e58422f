//! Gemini configuration

use lexi_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Configuration for the Gemini analysis client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-3-flash-preview";
    pub const DEFAULT_API_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = non_blank_var("GEMINI_API_KEY")
            .or_else(|| non_blank_var("API_KEY"))
            .ok_or_else(|| {
                Error::Configuration(
                    "GEMINI_API_KEY or API_KEY environment variable not found".to_string(),
                )
            })?;

        let timeout_secs = match env::var("LEXIGUARD_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Configuration(format!(
                    "LEXIGUARD_TIMEOUT_SECS must be a whole number of seconds, got `{}`",
                    raw
                ))
            })?,
            Err(_) => Self::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model: Self::model_from_env(),
            api_url: non_blank_var("GEMINI_API_URL")
                .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string()),
            timeout_secs,
        })
    }

    /// Create configuration with explicit values
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            api_url: Self::DEFAULT_API_URL.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Model named by `LEXIGUARD_MODEL`, or the default
    pub fn model_from_env() -> String {
        dotenvy::dotenv().ok();
        non_blank_var("LEXIGUARD_MODEL").unwrap_or_else(|| Self::DEFAULT_MODEL.to_string())
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Reject a blank credential before anything goes on the wire
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration(
                "API key is missing. Please check your environment configuration.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

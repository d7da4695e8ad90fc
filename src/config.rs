//! Configuration management for finagent.
//!
//! Configuration is read once at process start from environment variables:
//! - `FINANCIAL_DATASETS_API_KEY` - Credential for the Financial Datasets API.
//! - `GEMINI_API_KEY` - Credential for the language-model provider.
//! - `DEFAULT_MODEL` - Model identifier handed to the agent runtime.
//! - `AGENT_RUNTIME_URL` - Optional. Base URL of the agent runtime. Defaults to `http://127.0.0.1:8800`.
//! - `PUBLIC_URL` - Optional. Externally reachable base URL of this service, used for tool callbacks.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//!
//! The credentials and model are deliberately *not* required at startup:
//! `/health` must answer regardless of configuration state, and their
//! absence surfaces as explicit per-request configuration errors rather
//! than silent defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Financial Datasets API credential
    pub datasets_api_key: Option<String>,

    /// Language-model provider credential
    pub llm_api_key: Option<String>,

    /// Model identifier for the agent runtime
    pub default_model: Option<String>,

    /// Base URL of the external agent runtime
    pub agent_runtime_url: String,

    /// Externally reachable base URL of this service (for tool callbacks)
    pub public_url: Option<String>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `PORT` is not a valid number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let datasets_api_key = non_empty(std::env::var("FINANCIAL_DATASETS_API_KEY").ok());
        let llm_api_key = non_empty(std::env::var("GEMINI_API_KEY").ok());
        let default_model = non_empty(std::env::var("DEFAULT_MODEL").ok());

        let agent_runtime_url = std::env::var("AGENT_RUNTIME_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8800".to_string());

        let public_url = non_empty(std::env::var("PUBLIC_URL").ok());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        Ok(Self {
            datasets_api_key,
            llm_api_key,
            default_model,
            agent_runtime_url,
            public_url,
            host,
            port,
        })
    }

    /// Environment variables an analysis run needs but which are not set.
    pub fn missing_runtime_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.datasets_api_key.is_none() {
            missing.push("FINANCIAL_DATASETS_API_KEY");
        }
        if self.llm_api_key.is_none() {
            missing.push("GEMINI_API_KEY");
        }
        if self.default_model.is_none() {
            missing.push("DEFAULT_MODEL");
        }
        missing
    }

    /// Base URL the agent runtime uses to call tools back through us.
    pub fn tool_callback_url(&self) -> String {
        let base = self
            .public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port));
        format!("{}/api/tools", base.trim_end_matches('/'))
    }
}

/// Treat empty environment values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

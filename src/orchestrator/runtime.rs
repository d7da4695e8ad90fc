//! HTTP adapter for the hosted agent runtime.
//!
//! Ships the task, the declarative team, and the tool schema catalogue to
//! the runtime's run endpoint and waits for the final text. Tool calls made
//! by the runtime come back through this service's `/api/tools` surface via
//! the callback URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::team::{self, TeamSpec};
use super::Orchestrator;
use crate::config::Config;
use crate::tools::ToolDefinition;

/// Request body for the runtime's run endpoint.
#[derive(Debug, Serialize)]
struct RunTeamRequest<'a> {
    model: &'a str,
    task: &'a str,
    team: &'a TeamSpec,
    tools: &'a [ToolDefinition],
    /// Base URL the runtime POSTs tool invocations back to.
    tool_endpoint: String,
}

/// Response body from the runtime's run endpoint.
#[derive(Debug, Deserialize)]
struct RunTeamResponse {
    output: String,
}

/// Client for the external agent runtime.
pub struct AgentRuntimeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: Option<String>,
    team: TeamSpec,
    tools: Vec<ToolDefinition>,
    tool_endpoint: String,
}

impl AgentRuntimeClient {
    /// Build the production client from config plus the registry's schemas.
    pub fn new(config: &Config, tools: Vec<ToolDefinition>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.agent_runtime_url.clone(),
            api_key: config.llm_api_key.clone(),
            model: config.default_model.clone(),
            team: team::analysis_team(),
            tools,
            tool_endpoint: config.tool_callback_url(),
        }
    }
}

#[async_trait]
impl Orchestrator for AgentRuntimeClient {
    async fn invoke(&self, task: &str) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not configured"))?;
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DEFAULT_MODEL is not configured"))?;

        let request = RunTeamRequest {
            model,
            task,
            team: &self.team,
            tools: &self.tools,
            tool_endpoint: self.tool_endpoint.clone(),
        };

        tracing::debug!("Submitting team run to {} (model={})", self.base_url, model);

        let response = self
            .client
            .post(format!("{}/v1/team/runs", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("agent runtime unreachable: {}", e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            anyhow::bail!("agent runtime returned HTTP {}: {}", status, body);
        }

        let parsed: RunTeamResponse = serde_json::from_str(&body)
            .map_err(|e| anyhow::anyhow!("failed to parse runtime response: {}", e))?;

        Ok(parsed.output)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    fn test_config(addr: SocketAddr) -> Config {
        Config {
            datasets_api_key: Some("fd-key".to_string()),
            llm_api_key: Some("llm-key".to_string()),
            default_model: Some("gemini-2.5-pro".to_string()),
            agent_runtime_url: format!("http://{}", addr),
            public_url: Some("http://analysis.example.com".to_string()),
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    async fn spawn_runtime(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn invoke_returns_runtime_output() {
        async fn run(Json(body): Json<Value>) -> Json<Value> {
            // The declarative payload must be complete.
            assert_eq!(body["model"], "gemini-2.5-pro");
            assert_eq!(body["task"], "screen the market");
            assert!(body["team"]["members"].as_array().unwrap().len() == 2);
            assert!(body["tool_endpoint"]
                .as_str()
                .unwrap()
                .starts_with("http://analysis.example.com"));
            Json(json!({"output": "| ticker | score |"}))
        }

        let addr = spawn_runtime(Router::new().route("/v1/team/runs", post(run))).await;
        let client = AgentRuntimeClient::new(&test_config(addr), Vec::new());

        let out = client.invoke("screen the market").await.unwrap();
        assert_eq!(out, "| ticker | score |");
    }

    #[tokio::test]
    async fn runtime_error_propagates_with_status_and_body() {
        async fn run() -> (StatusCode, &'static str) {
            (StatusCode::BAD_GATEWAY, "model overloaded")
        }

        let addr = spawn_runtime(Router::new().route("/v1/team/runs", post(run))).await;
        let client = AgentRuntimeClient::new(&test_config(addr), Vec::new());

        let err = client.invoke("task").await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("502"));
        assert!(text.contains("model overloaded"));
    }

    #[tokio::test]
    async fn missing_llm_credential_fails_before_any_request() {
        let mut config = test_config("127.0.0.1:1".parse().unwrap());
        config.llm_api_key = None;

        let client = AgentRuntimeClient::new(&config, Vec::new());
        let err = client.invoke("task").await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}

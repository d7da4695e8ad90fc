//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::datasets::FinancialDatasetsClient;
use crate::orchestrator::{AgentRuntimeClient, Orchestrator};
use crate::tools::{ToolDefinition, ToolRegistry};

use super::types::*;

/// Shared application state.
///
/// The only cross-request state is read-only: the config snapshot taken at
/// startup, the orchestrator handle, and the tool registry. Nothing here is
/// mutated after initialization.
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<dyn Orchestrator>,
    pub tools: Arc<ToolRegistry>,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let datasets = FinancialDatasetsClient::new(config.datasets_api_key.clone());
    let tools = Arc::new(ToolRegistry::new(datasets));
    let orchestrator: Arc<dyn Orchestrator> =
        Arc::new(AgentRuntimeClient::new(&config, tools.get_tool_schemas()));

    let addr = format!("{}:{}", config.host, config.port);

    let state = Arc::new(AppState {
        config,
        orchestrator,
        tools,
    });

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router. Split out of [`serve`] so tests can mount it on an
/// ephemeral listener with a mock orchestrator.
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(call_tool))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check. Reports configuration readiness but always answers 200 so
/// the probe itself never flaps on missing credentials.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        datasets_key_configured: state.config.datasets_api_key.is_some(),
        llm_key_configured: state.config.llm_api_key.is_some(),
        model_configured: state.config.default_model.is_some(),
    })
}

/// Run the agent team against a free-text task.
async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Fail fast on configuration before touching the orchestrator.
    let missing = state.config.missing_runtime_vars();
    if !missing.is_empty() {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!(
                    "Required environment variables are not configured: {}",
                    missing.join(", ")
                ),
            }),
        ));
    }

    let run_id = Uuid::new_v4();
    tracing::info!(%run_id, "Starting analysis run");

    match state.orchestrator.invoke(&req.task).await {
        Ok(analysis) => {
            tracing::info!(%run_id, "Analysis run completed");
            Ok(Json(AnalyzeResponse {
                analysis,
                status: "success".to_string(),
            }))
        }
        Err(e) => {
            tracing::error!(%run_id, "Analysis run failed: {:#}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Agent execution failed: {:#}", e),
                }),
            ))
        }
    }
}

/// Tool schema catalogue, in the format the agent runtime consumes.
async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Vec<ToolDefinition>> {
    Json(state.tools.get_tool_schemas())
}

/// Execute one tool on behalf of the agent runtime.
async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> Result<Json<ToolCallResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !state.tools.has_tool(&name) {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown tool: {}", name),
            }),
        ));
    }

    match state.tools.execute(&name, args).await {
        Ok(output) => Ok(Json(ToolCallResponse { output })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Tool execution failed: {:#}", e),
            }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;

    /// Orchestrator stand-in that counts invocations.
    struct MockOrchestrator {
        calls: AtomicUsize,
        reply: &'static str,
        fail: bool,
    }

    impl MockOrchestrator {
        fn succeeding(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply,
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: "",
                fail: true,
            })
        }
    }

    #[async_trait]
    impl Orchestrator for MockOrchestrator {
        async fn invoke(&self, _task: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("runtime fell over");
            }
            Ok(self.reply.to_string())
        }
    }

    fn configured() -> Config {
        Config {
            datasets_api_key: Some("fd-key".to_string()),
            llm_api_key: Some("llm-key".to_string()),
            default_model: Some("gemini-2.5-pro".to_string()),
            agent_runtime_url: "http://127.0.0.1:8800".to_string(),
            public_url: None,
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    fn unconfigured() -> Config {
        Config {
            datasets_api_key: None,
            llm_api_key: None,
            default_model: None,
            agent_runtime_url: "http://127.0.0.1:8800".to_string(),
            public_url: None,
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    async fn spawn_app(
        config: Config,
        orchestrator: Arc<dyn Orchestrator>,
        datasets: FinancialDatasetsClient,
    ) -> SocketAddr {
        let state = Arc::new(AppState {
            config,
            orchestrator,
            tools: Arc::new(ToolRegistry::new(datasets)),
        });
        let app = router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn health_is_200_with_and_without_credentials() {
        for config in [configured(), unconfigured()] {
            let expected_ready = config.datasets_api_key.is_some();
            let addr = spawn_app(
                config,
                MockOrchestrator::succeeding("unused"),
                FinancialDatasetsClient::new(None),
            )
            .await;

            let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
            assert_eq!(response.status(), 200);

            let body: Value = response.json().await.unwrap();
            assert_eq!(body["status"], "ok");
            assert_eq!(body["datasets_key_configured"], expected_ready);
        }
    }

    #[tokio::test]
    async fn analyze_succeeds_when_configured() {
        let orchestrator = MockOrchestrator::succeeding("| TCS.NS | 8/10 |");
        let addr = spawn_app(
            configured(),
            Arc::clone(&orchestrator) as Arc<dyn Orchestrator>,
            FinancialDatasetsClient::new(Some("fd-key".to_string())),
        )
        .await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/analyze", addr))
            .json(&json!({"task": "screen Indian stocks"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["analysis"], "| TCS.NS | 8/10 |");
        assert_eq!(body["status"], "success");
        assert_eq!(orchestrator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn analyze_with_missing_env_never_reaches_the_orchestrator() {
        let orchestrator = MockOrchestrator::succeeding("unused");
        let addr = spawn_app(
            unconfigured(),
            Arc::clone(&orchestrator) as Arc<dyn Orchestrator>,
            FinancialDatasetsClient::new(None),
        )
        .await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/analyze", addr))
            .json(&json!({"task": "screen Indian stocks"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("FINANCIAL_DATASETS_API_KEY"));
        assert!(error.contains("GEMINI_API_KEY"));
        assert_eq!(orchestrator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn orchestrator_failure_maps_to_500_with_the_error_text() {
        let addr = spawn_app(
            configured(),
            MockOrchestrator::failing(),
            FinancialDatasetsClient::new(Some("fd-key".to_string())),
        )
        .await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/analyze", addr))
            .json(&json!({"task": "anything"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("runtime fell over"));
    }

    #[tokio::test]
    async fn tool_catalogue_lists_every_registered_tool() {
        let addr = spawn_app(
            configured(),
            MockOrchestrator::succeeding("unused"),
            FinancialDatasetsClient::new(Some("fd-key".to_string())),
        )
        .await;

        let response = reqwest::get(format!("http://{}/api/tools", addr)).await.unwrap();
        assert_eq!(response.status(), 200);

        let body: Vec<Value> = response.json().await.unwrap();
        let names: Vec<&str> = body
            .iter()
            .map(|d| d["function"]["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"income_statements"));
        assert!(names.contains(&"web_search"));
        assert_eq!(body.len(), crate::tools::datasets::CATALOG.len() + 1);
    }

    #[tokio::test]
    async fn unknown_tool_is_a_404() {
        let addr = spawn_app(
            configured(),
            MockOrchestrator::succeeding("unused"),
            FinancialDatasetsClient::new(Some("fd-key".to_string())),
        )
        .await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/api/tools/nonexistent", addr))
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn tool_callback_passes_upstream_body_through() {
        // Upstream datasets stub: whatever it returns must come back verbatim
        // in the tool output.
        async fn company() -> &'static str {
            "{\"name\": \"Tata Consultancy Services\"}"
        }
        let upstream = Router::new().route("/company", get(company));
        let upstream_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let upstream_addr = upstream_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(upstream_listener, upstream).await.unwrap();
        });

        let datasets = FinancialDatasetsClient::with_base_url(
            Some("fd-key".to_string()),
            format!("http://{}", upstream_addr),
        );
        let addr = spawn_app(configured(), MockOrchestrator::succeeding("unused"), datasets).await;

        let response = reqwest::Client::new()
            .post(format!("http://{}/api/tools/company_info", addr))
            .json(&json!({"ticker": "TCS.NS"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["output"], "{\"name\": \"Tata Consultancy Services\"}");
    }
}

//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to run an analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text task for the agent team
    pub task: String,
}

/// Result of a completed analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    /// Final text produced by the agent team
    pub analysis: String,

    /// Always "success" on the 200 path
    pub status: String,
}

/// Health/readiness report. Always served with HTTP 200; the flags describe
/// configuration state without failing the probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub datasets_key_configured: bool,
    pub llm_key_configured: bool,
    pub model_configured: bool,
}

/// Output of a tool invoked through the callback surface.
///
/// The text may itself be a serialized tool error; that is still a 200.
/// The caller is an agent runtime that wants terminal text, not a status
/// code to interpret.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResponse {
    pub output: String,
}

/// Error body for non-2xx responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

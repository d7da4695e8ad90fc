//! Tool system exposed to the agent team.
//!
//! Tools are the read-only queries the agents can run: the Financial
//! Datasets catalogue plus a web search. Each tool carries a
//! natural-language description and a JSON-schema parameter spec; both are
//! metadata for the external runtime's tool selection and are never
//! interpreted here.
//!
//! The financial queries are not hand-written structs but rows in a
//! declarative table (see [`datasets::CATALOG`]) dispatched by one generic
//! tool, so adding an endpoint is a table edit, not new code.

pub mod datasets;
mod web;

pub use web::WebSearch;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datasets::FinancialDatasetsClient;

/// Information about a tool for display purposes.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Tool definition in the wire format the agent runtime expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

/// Function definition with schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Trait for implementing tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool.
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    ///
    /// Dataset tools always return `Ok`: upstream failures come back as
    /// serialized error payloads in the output text.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Registry of available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a registry with the full default tool set.
    pub fn new(datasets: FinancialDatasetsClient) -> Self {
        let mut tools: HashMap<String, Arc<dyn Tool>> = HashMap::new();

        // One generic query tool per catalogue row.
        for spec in datasets::CATALOG {
            tools.insert(
                spec.name.to_string(),
                Arc::new(datasets::DatasetQuery::new(spec, datasets.clone())),
            );
        }

        // Web search for news, sector trends, and outlook.
        tools.insert("web_search".to_string(), Arc::new(web::WebSearch));

        tracing::debug!("Tool registry initialized with {} tools", tools.len());
        Self { tools }
    }

    /// Create an empty registry (no built-in tools).
    pub fn empty() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Check if a tool exists by name.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool schemas in the runtime-compatible format.
    pub fn get_tool_schemas(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition {
                tool_type: "function".to_string(),
                function: FunctionDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tool.execute(args).await
    }
}

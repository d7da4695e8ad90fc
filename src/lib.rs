//! # finagent
//!
//! HTTP service exposing a financial-analysis agent team for the Indian
//! market. The reasoning itself lives in an external agent runtime; this
//! crate supplies everything around it:
//!
//! - A resilient client for the Financial Datasets API that converts every
//!   failure into terminal text an agent can reason over
//! - A declarative catalogue of read-only market-data query tools, plus a
//!   web search tool
//! - The team configuration (roles, instructions, tool assignments) as data
//! - A thin HTTP front door: `POST /analyze`, `GET /health`, and the tool
//!   callback surface the runtime uses to execute queries
//!
//! ## Task Flow
//! 1. `POST /analyze` receives a free-text task
//! 2. The task, team spec, and tool schemas go to the agent runtime
//! 3. The runtime calls tools back through `/api/tools/:name`
//! 4. The runtime's final text comes back as the analysis
//!
//! ## Modules
//! - `datasets`: Financial Datasets API client
//! - `tools`: tool trait, registry, and the query catalogue
//! - `orchestrator`: agent runtime boundary and team configuration
//! - `api`: axum routes

pub mod api;
pub mod config;
pub mod datasets;
pub mod orchestrator;
pub mod tools;

pub use config::Config;
pub use datasets::FinancialDatasetsClient;
pub use orchestrator::Orchestrator;
pub use tools::ToolRegistry;

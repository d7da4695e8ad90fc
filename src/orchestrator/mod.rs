//! Boundary with the external agent runtime.
//!
//! Multi-agent reasoning, planning, and delegation are not implemented in
//! this crate: they live in a hosted agent runtime reached over HTTP. The
//! whole contract is [`Orchestrator::invoke`], a task string in and the
//! final analysis text out. What travels with the request is pure data: the
//! declarative team configuration ([`team`]) and the tool schema catalogue,
//! plus a callback URL the runtime uses to execute tools through this
//! service.

mod runtime;
pub mod team;

pub use runtime::AgentRuntimeClient;
pub use team::{AgentSpec, TeamSpec};

use async_trait::async_trait;

/// The external multi-agent runtime, as seen from this crate.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Run the team against a free-text task and return its final text.
    ///
    /// Errors here are runtime failures; the HTTP boundary maps them to a
    /// 500 response with the error text.
    async fn invoke(&self, task: &str) -> anyhow::Result<String>;
}

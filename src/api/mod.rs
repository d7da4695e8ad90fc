//! HTTP API for the analysis service.
//!
//! ## Endpoints
//!
//! - `POST /analyze` - Run the agent team against a free-text task
//! - `GET /health` - Health/readiness check (always 200)
//! - `GET /api/tools` - Tool schema catalogue for the agent runtime
//! - `POST /api/tools/:name` - Execute one tool (runtime callback surface)

mod routes;
pub mod types;

pub use routes::serve;
pub use types::*;

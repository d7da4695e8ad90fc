//! Client for the Financial Datasets API.
//!
//! This is the single outbound seam for market data: authenticated GETs
//! against a fixed base URL, with all failure modes normalized into a
//! structured, serializable error value. Callers (the query tools) never
//! see an `Err`; they get terminal text either way.

mod client;
mod error;

pub use client::{FinancialDatasetsClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiErrorKind};

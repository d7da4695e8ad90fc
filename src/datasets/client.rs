//! HTTP client for the Financial Datasets API.
//!
//! Every query tool in the registry funnels through [`FinancialDatasetsClient::fetch`],
//! which never returns an `Err`: failures come back as a serialized
//! [`ApiError`](super::ApiError) payload so the calling agent always receives
//! parsable text. There is no timeout, retry, or backoff here: transient
//! failures are surfaced immediately and the agent decides whether to
//! re-query.

use reqwest::Client;
use serde_json::{Map, Value};

use super::error::ApiError;

/// Production base URL for the Financial Datasets API.
pub const DEFAULT_BASE_URL: &str = "https://api.financialdatasets.ai";

/// Header carrying the datasets credential.
const API_KEY_HEADER: &str = "X-API-KEY";

/// Client for the Financial Datasets API.
///
/// The credential is resolved once at construction and held immutably for
/// the life of the process; concurrent requests share it read-only.
#[derive(Debug, Clone)]
pub struct FinancialDatasetsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl FinancialDatasetsClient {
    /// Create a client against the production API.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    /// Fetch `{base}/{endpoint}?{params}` and return terminal text.
    ///
    /// On success this is the response body verbatim (expected to be JSON,
    /// passed through uninterpreted). On any failure it is a serialized
    /// [`ApiError`](super::ApiError).
    pub async fn fetch(&self, endpoint: &str, params: &Map<String, Value>) -> String {
        match self.try_fetch(endpoint, params).await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!("Financial Datasets request failed: {}", err);
                err.to_payload()
            }
        }
    }

    /// Typed variant of [`fetch`](Self::fetch).
    pub async fn try_fetch(
        &self,
        endpoint: &str,
        params: &Map<String, Value>,
    ) -> Result<String, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ApiError::config("missing credential: FINANCIAL_DATASETS_API_KEY is not set")
            })?;

        let url = format!("{}/{}", self.base_url, endpoint);
        let request = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .query(&query_pairs(params))
            .build()
            .map_err(|e| {
                ApiError::request_failed(
                    url.clone(),
                    format!("failed to build request: {}", e),
                    None,
                )
            })?;

        // The resolved URL (query string included) goes into every error so
        // the agent can see exactly what was asked of the upstream.
        let resolved_url = request.url().to_string();

        let response = self.client.execute(request).await.map_err(|e| {
            ApiError::request_failed(resolved_url.clone(), e.to_string(), None)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ApiError::request_failed(
                resolved_url.clone(),
                format!("failed to read response body: {}", e),
                None,
            )
        })?;

        if !status.is_success() {
            return Err(ApiError::request_failed(
                resolved_url,
                format!("upstream returned HTTP {}", status),
                Some(body),
            ));
        }

        Ok(body)
    }
}

/// Flatten a parameter map into query pairs, skipping anything that is not a
/// scalar. Optional parameters that were never set are simply not in the map.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| scalar_to_string(value).map(|v| (key.clone(), v)))
        .collect()
}

/// Render a scalar JSON value as a query-string value.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

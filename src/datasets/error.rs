//! Error type for the Financial Datasets client.
//!
//! Failures are values, not exceptions: the consumer of a tool result is a
//! language model, which needs a terminal string it can reason over even
//! when the upstream call went wrong. `ApiError` therefore serializes to a
//! JSON payload instead of crossing the client boundary as an `Err`.

use serde::{Deserialize, Serialize};

/// Classification of client failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No credential configured. Detected before any network I/O.
    Config,
    /// Network failure, timeout, or non-2xx response from upstream.
    RequestFailed,
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::Config => write!(f, "config"),
            ApiErrorKind::RequestFailed => write!(f, "request_failed"),
        }
    }
}

/// A failed Financial Datasets call, with enough context for the calling
/// agent to extract partial information (an error page body is still data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub kind: ApiErrorKind,

    /// Fully resolved request URL, when one was built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Short diagnostic message.
    pub message: String,

    /// Response body, when a response was received at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
}

impl ApiError {
    /// Missing or empty credential. No request was attempted.
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Config,
            url: None,
            message: message.into(),
            raw_body: None,
        }
    }

    /// Transport failure or non-2xx status.
    pub fn request_failed(
        url: impl Into<String>,
        message: impl Into<String>,
        raw_body: Option<String>,
    ) -> Self {
        Self {
            kind: ApiErrorKind::RequestFailed,
            url: Some(url.into()),
            message: message.into(),
            raw_body,
        }
    }

    /// Serialize into the terminal JSON string handed back to the agent.
    pub fn to_payload(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"kind":"{}","message":"{}"}}"#, self.kind, self.message)
        })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.url {
            Some(ref url) => write!(f, "{} ({}): {}", self.kind, url, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

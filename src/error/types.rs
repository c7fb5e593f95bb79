//! Core error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of the `errors` array the API returns, either next to partial
/// `data` or as the whole body of a failed call.
///
/// Only `title`/`detail` are reliably present; everything else the server
/// sends is kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ApiErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// v1.1 style numeric code (media upload endpoint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// v1.1 style message (media upload endpoint).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ApiErrorObject {
    /// Best human-readable description of this error.
    pub fn summary(&self) -> String {
        match (&self.title, &self.detail, &self.message) {
            (Some(t), Some(d), _) => format!("{t}: {d}"),
            (None, Some(d), _) => d.clone(),
            (_, None, Some(m)) => m.clone(),
            (Some(t), None, None) => t.clone(),
            (None, None, None) => "unknown API error".to_string(),
        }
    }
}

/// Main error type for the client.
#[derive(Error, Debug, Clone)]
pub enum TwitterError {
    /// No response was obtained (connect, TLS, timeout, truncated body, or an
    /// error status whose body could not be understood). Nothing was
    /// committed server-side as far as the client can tell, so the same
    /// logical step may be repeated.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Structured API-level failure. `errors` carries the decoded error
    /// objects exactly as the server returned them.
    #[error("API error ({status}): {message}")]
    ApiError {
        status: u16,
        message: String,
        errors: Vec<ApiErrorObject>,
    },

    /// A local precondition was broken by the caller (out-of-order segment,
    /// early finalize, use of a finished session, ...).
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// A successful response body did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Coarse classification of a [`TwitterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-level failure, safe to repeat.
    Transport,
    /// Rejected by the server with 4xx.
    Client,
    /// Server side 5xx.
    Server,
    /// 429 Too Many Requests.
    RateLimit,
    /// Caller programming error.
    Protocol,
    /// Anything produced while building or decoding locally.
    Local,
}

//! Constructors and classification helpers for [`TwitterError`].

use super::types::{ApiErrorObject, ErrorCategory, TwitterError};

impl TwitterError {
    /// Create an API error from a status and message with no structured errors.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Create an API error from the structured error list of a response.
    pub fn api_error_with_errors(status: u16, errors: Vec<ApiErrorObject>) -> Self {
        let message = match errors.as_slice() {
            [] => "request failed".to_string(),
            [only] => only.summary(),
            [first, rest @ ..] => format!("{} (+{} more)", first.summary(), rest.len()),
        };
        Self::ApiError {
            status,
            message,
            errors,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError(message.into())
    }

    pub fn protocol_violation(message: impl Into<String>) -> Self {
        Self::ProtocolViolation(message.into())
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TransportError(_) => ErrorCategory::Transport,
            Self::ApiError { status: 429, .. } => ErrorCategory::RateLimit,
            Self::ApiError { status, .. } if *status >= 500 => ErrorCategory::Server,
            Self::ApiError { .. } => ErrorCategory::Client,
            Self::ProtocolViolation(_) => ErrorCategory::Protocol,
            Self::ParseError(_)
            | Self::ConfigurationError(_)
            | Self::InvalidParameter(_)
            | Self::IoError(_) => ErrorCategory::Local,
        }
    }

    /// Whether repeating the exact same step is safe.
    ///
    /// Only transport failures qualify: an API error means the server saw
    /// and judged the request, and a protocol violation will fail the same
    /// way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::ProtocolViolation(_))
    }

    /// HTTP status for API errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Structured error objects carried by an API error (empty otherwise).
    pub fn api_errors(&self) -> &[ApiErrorObject] {
        match self {
            Self::ApiError { errors, .. } => errors,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for TwitterError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for TwitterError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

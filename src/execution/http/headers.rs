//! HTTP Headers Utility

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

use crate::error::TwitterError;

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, TwitterError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            TwitterError::ConfigurationError(format!("Invalid bearer token format: {e}"))
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Ask for JSON responses
    pub fn with_json_accept(mut self) -> Self {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, TwitterError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            TwitterError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                TwitterError::ConfigurationError(format!("Invalid header value for '{name}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add multiple custom headers
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, TwitterError> {
        for (key, value) in custom_headers {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

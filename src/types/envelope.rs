//! The `{data, includes, meta, errors}` envelope every v2 endpoint returns.

use serde::{Deserialize, Serialize};

use crate::error::ApiErrorObject;

/// Pagination and count metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Opaque handle for the following page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,
    /// Tweet counts endpoints only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tweet_count: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Meta {
    /// The next-page token, treating an empty string as absent.
    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Decoded response.
///
/// `data` keeps server order. A lookup that returns a single object is
/// presented as a one-element `data`. `errors` may be non-empty next to
/// non-empty `data` (partial success); both are always kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope<T> {
    pub data: Vec<T>,
    pub includes: Option<serde_json::Value>,
    pub meta: Option<Meta>,
    pub errors: Vec<ApiErrorObject>,
}

impl<T> Default for ResponseEnvelope<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            includes: None,
            meta: None,
            errors: Vec::new(),
        }
    }
}

impl<T> ResponseEnvelope<T> {
    /// Next-page token, if the server reported one.
    pub fn next_token(&self) -> Option<&str> {
        self.meta.as_ref().and_then(Meta::next_token)
    }

    pub fn result_count(&self) -> Option<u64> {
        self.meta.as_ref().and_then(|m| m.result_count)
    }

    /// True when the server returned both records and errors.
    pub fn is_partial(&self) -> bool {
        !self.data.is_empty() && !self.errors.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Take the first record, for single-object endpoints.
    pub fn into_single(self) -> Option<T> {
        self.data.into_iter().next()
    }
}

//! Decoding raw responses into [`ResponseEnvelope`]s.
//!
//! Rules:
//! - 2xx with `data` and `errors` is a partial success; both are returned.
//! - 2xx with `errors` and no `data` is an API error.
//! - non-2xx with a recognizable error body is an API error carrying the
//!   decoded error objects.
//! - non-2xx with anything else is a transport-class failure.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiErrorObject, Result, TwitterError};
use crate::types::{Meta, ResponseEnvelope};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    data: Option<OneOrMany<T>>,
    #[serde(default)]
    includes: Option<serde_json::Value>,
    #[serde(default)]
    meta: Option<Meta>,
    #[serde(default)]
    errors: Vec<ApiErrorObject>,
}

/// Shape of an error response. Covers the v2 `errors` array, RFC 7807
/// problem documents (`title`/`detail`/`type`) and the v1.1 upload host's
/// `{"errors":[{"code":..,"message":..}]}` / `{"error": ".."}` bodies.
#[derive(Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorObject>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl RawErrorBody {
    fn into_errors(self) -> Vec<ApiErrorObject> {
        if !self.errors.is_empty() {
            return self.errors;
        }
        if self.title.is_some() || self.detail.is_some() || self.error_type.is_some() {
            return vec![ApiErrorObject {
                title: self.title,
                detail: self.detail,
                error_type: self.error_type,
                ..Default::default()
            }];
        }
        match self.error {
            Some(message) => vec![ApiErrorObject {
                message: Some(message),
                ..Default::default()
            }],
            None => Vec::new(),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(|b| b.is_ascii_whitespace())
}

/// Build the error for a non-2xx response.
pub fn error_from_response(status: u16, body: &[u8]) -> TwitterError {
    let errors = serde_json::from_slice::<RawErrorBody>(body)
        .map(RawErrorBody::into_errors)
        .unwrap_or_default();
    if errors.is_empty() {
        let snippet: String = String::from_utf8_lossy(body).chars().take(200).collect();
        return TwitterError::TransportError(format!(
            "HTTP {status} with unrecognized body: {snippet}"
        ));
    }
    TwitterError::api_error_with_errors(status, errors)
}

/// Decode an envelope response.
pub fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<ResponseEnvelope<T>> {
    if !is_success(status) {
        return Err(error_from_response(status, body));
    }
    if is_blank(body) {
        return Ok(ResponseEnvelope::default());
    }

    let raw: RawEnvelope<T> = serde_json::from_slice(body)
        .map_err(|e| TwitterError::ParseError(format!("invalid response envelope: {e}")))?;
    let data = match raw.data {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    };

    if data.is_empty() && !raw.errors.is_empty() {
        return Err(TwitterError::api_error_with_errors(status, raw.errors));
    }
    if !raw.errors.is_empty() {
        tracing::debug!(
            records = data.len(),
            errors = raw.errors.len(),
            "partial success response"
        );
    }

    Ok(ResponseEnvelope {
        data,
        includes: raw.includes,
        meta: raw.meta,
        errors: raw.errors,
    })
}

/// Decode a plain (non-envelope) JSON response, such as the media upload
/// endpoint's.
pub fn decode_json<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if !is_success(status) {
        return Err(error_from_response(status, body));
    }
    serde_json::from_slice(body)
        .map_err(|e| TwitterError::ParseError(format!("invalid response body: {e}")))
}

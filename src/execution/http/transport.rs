//! HTTP transport abstraction.
//!
//! Every network call made by the client goes through [`HttpTransport`]. The
//! default implementation is [`super::ReqwestTransport`]; tests and callers
//! with their own HTTP stack inject a different one through
//! `TwitterClientBuilder::transport`.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::HeaderMap;

use crate::error::TwitterError;

/// Request body variants.
#[derive(Debug, Clone, Default)]
pub enum HttpBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`; the wire encoding is left to the transport.
    Multipart(MultipartBody),
}

/// Multipart body description: text fields plus at most one binary part.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub file: Option<MultipartFile>,
}

impl MultipartBody {
    /// Value of a text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct MultipartFile {
    /// Form field name.
    pub name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: HttpBody,
}

impl HttpTransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: HttpBody::Empty,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: HttpBody) -> Self {
        self.body = body;
        self
    }

    /// Value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One HTTP round trip.
///
/// Implementations return `Err` only when no response was obtained and map
/// it to [`TwitterError::TransportError`]. Any status code, including 4xx and
/// 5xx, is an `Ok` response; interpreting it is the caller's job.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, TwitterError>;
}

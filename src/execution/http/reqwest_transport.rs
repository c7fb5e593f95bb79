//! [`HttpTransport`] over a shared `reqwest::Client`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::transport::{
    HttpBody, HttpTransport, HttpTransportRequest, HttpTransportResponse, MultipartBody,
};
use crate::error::TwitterError;
use crate::types::HttpConfig;

/// Default transport. Cheap to clone; the connection pool is shared.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport from an [`HttpConfig`].
    pub fn from_config(cfg: &HttpConfig) -> Result<Self, TwitterError> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = cfg.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(proxy_url) = &cfg.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                TwitterError::ConfigurationError(format!("Invalid proxy URL: {e}"))
            })?;
            builder = builder.proxy(proxy);
        }
        if let Some(user_agent) = &cfg.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if !cfg.headers.is_empty() {
            let headers = super::HttpHeaderBuilder::new()
                .with_custom_headers(&cfg.headers)?
                .build();
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|e| {
            TwitterError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self { client })
    }
}

fn multipart_form(body: MultipartBody) -> Result<Form, TwitterError> {
    let mut form = Form::new();
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    if let Some(file) = body.file {
        let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
        if let Some(ct) = &file.content_type {
            part = part.mime_str(ct).map_err(|e| {
                TwitterError::InvalidParameter(format!("Invalid content type '{ct}': {e}"))
            })?;
        }
        form = form.part(file.name, part);
    }
    Ok(form)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, TwitterError> {
        let HttpTransportRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        tracing::debug!(method = %method, url = %url, "sending request");

        let mut builder = self.client.request(method, &url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            HttpBody::Empty => builder,
            HttpBody::Json(json) => builder.json(&json),
            HttpBody::Form(fields) => builder.form(&fields),
            HttpBody::Multipart(mp) => builder.multipart(multipart_form(mp)?),
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| TwitterError::TransportError(e.to_string()))?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|e| {
            TwitterError::TransportError(format!("Failed to read response body: {e}"))
        })?;

        tracing::debug!(status, url = %url, bytes = body.len(), "received response");

        Ok(HttpTransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

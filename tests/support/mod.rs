//! Scripted transport double shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use twitter_v2::execution::http::{
    HttpBody, HttpTransport, HttpTransportRequest, HttpTransportResponse,
};
use twitter_v2::prelude::*;

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpTransportResponse, TwitterError>>>>,
    calls: Arc<Mutex<Vec<HttpTransportRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(HttpTransportResponse {
            status,
            headers: HeaderMap::new(),
            body: serde_json::to_vec(&body).expect("json bytes"),
        }))
    }

    pub fn push_empty(&self, status: u16) -> &Self {
        self.push(Ok(HttpTransportResponse {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }))
    }

    pub fn push_transport_error(&self, message: &str) -> &Self {
        self.push(Err(TwitterError::transport(message)))
    }

    fn push(&self, item: Result<HttpTransportResponse, TwitterError>) -> &Self {
        self.responses.lock().expect("lock").push_back(item);
        self
    }

    pub fn calls(&self) -> Vec<HttpTransportRequest> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("lock").len()
    }

    pub fn client(&self) -> TwitterClient {
        self.client_with(|b| b)
    }

    pub fn client_with(
        &self,
        configure: impl FnOnce(TwitterClientBuilder) -> TwitterClientBuilder,
    ) -> TwitterClient {
        let transport: Arc<dyn HttpTransport> = Arc::new(self.clone());
        configure(
            TwitterClient::builder()
                .base_url("https://api.example.invalid/2")
                .upload_url("https://upload.example.invalid/1.1/media/upload.json")
                .bearer_token("test-token")
                .transport(transport),
        )
        .build()
        .expect("client")
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, TwitterError> {
        self.calls.lock().expect("lock").push(request);
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(TwitterError::transport("no scripted response left")))
    }
}

/// Text field of a form or multipart body.
pub fn body_field<'a>(request: &'a HttpTransportRequest, name: &str) -> Option<&'a str> {
    match &request.body {
        HttpBody::Form(fields) => fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str()),
        HttpBody::Multipart(mp) => mp.field(name),
        _ => None,
    }
}

/// Size of the binary part of a multipart body.
pub fn payload_len(request: &HttpTransportRequest) -> usize {
    match &request.body {
        HttpBody::Multipart(mp) => mp.file.as_ref().map(|f| f.bytes.len()).unwrap_or(0),
        _ => 0,
    }
}

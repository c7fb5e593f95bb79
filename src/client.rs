//! `TwitterClient`: endpoint calls, pagination and media upload behind one
//! handle.
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use twitter_v2::prelude::*;
//!
//! # async fn example() -> Result<(), TwitterError> {
//! let client = TwitterClient::builder().bearer_token_from_env()?.build()?;
//!
//! let mut pages = client.user_tweets("2244994945", RequestParams::new().max_results(100))?;
//! while let Some(page) = pages.try_next().await? {
//!     for tweet in &page.data {
//!         println!("{}: {}", tweet.id, tweet.text);
//!     }
//! }
//!
//! let media = client.upload_media(std::fs::read("clip.mp4")?, "video/mp4", "tweet_video").await?;
//! client
//!     .create_tweet(&CreateTweetRequest::text("hello").with_media_ids([media.media_id]))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::defaults;
use crate::encoding::decode_envelope;
use crate::error::{Result, TwitterError};
use crate::execution::http::{
    HttpBody, HttpHeaderBuilder, HttpTransport, HttpTransportRequest, ReqwestTransport,
};
use crate::pagination::{PageStream, paginate};
use crate::params::{Endpoint, RequestParams, endpoints};
use crate::retry::RetryPolicy;
use crate::types::{
    BooleanResult, CreateListRequest, CreateTweetRequest, HttpConfig, MediaUploadResult,
    ResponseEnvelope, Space, Tweet, TwitterList, User,
};
use crate::upload::{ChunkedUploadSession, MediaUploader, UploadOptions};

/// Client handle. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct TwitterClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    upload_url: String,
    headers: HeaderMap,
    uploader: MediaUploader,
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient")
            .field("base_url", &self.base_url)
            .field("upload_url", &self.upload_url)
            .field("upload_options", self.uploader.options())
            .finish_non_exhaustive()
    }
}

impl TwitterClient {
    pub fn builder() -> TwitterClientBuilder {
        TwitterClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
        token: Option<&str>,
    ) -> Result<ResponseEnvelope<T>> {
        let built = endpoint.build(&self.base_url, params, token)?;
        let body = match built.body {
            Some(json) => HttpBody::Json(json),
            None => HttpBody::Empty,
        };
        let request = HttpTransportRequest::new(built.method, built.url)
            .with_query(built.query)
            .with_headers(self.headers.clone())
            .with_body(body);

        let resp = self.transport.execute(request).await?;
        decode_envelope(resp.status, &resp.body).inspect_err(|e| {
            tracing::debug!(endpoint = endpoint.name, error = %e, "call failed");
        })
    }

    /// One call to `endpoint`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: RequestParams,
    ) -> Result<ResponseEnvelope<T>> {
        self.execute(endpoint, &params, None).await
    }

    /// Lazily page through a listing endpoint, starting at `initial_token`
    /// (`None` for the first page).
    ///
    /// Parameters are validated before the stream is returned. See
    /// [`crate::pagination::paginate`] for error and retry behaviour.
    pub fn paginate<T>(
        &self,
        endpoint: &'static Endpoint,
        params: RequestParams,
        initial_token: Option<String>,
    ) -> Result<PageStream<'static, T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        if !endpoint.is_paginated() {
            return Err(TwitterError::InvalidParameter(format!(
                "{} is not paginated",
                endpoint.name
            )));
        }
        endpoint.build(&self.base_url, &params, None)?;

        let client = self.clone();
        let params = Arc::new(params);
        let fetch = move |token: Option<String>| {
            let client = client.clone();
            let params = params.clone();
            async move { client.execute::<T>(endpoint, &params, token.as_deref()).await }
        };
        Ok(Box::pin(paginate(fetch, initial_token)))
    }

    // Tweets

    /// Tweet lookup with the client's default expansions and fields.
    pub async fn get_tweets<I, S>(&self, ids: I) -> Result<ResponseEnvelope<Tweet>>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.call(&endpoints::GET_TWEETS, RequestParams::new().list("ids", ids))
            .await
    }

    pub fn user_tweets(
        &self,
        user_id: &str,
        params: RequestParams,
    ) -> Result<PageStream<'static, Tweet>> {
        self.paginate(&endpoints::USER_TWEETS, params.path("id", user_id), None)
    }

    pub fn search_recent(
        &self,
        query: &str,
        params: RequestParams,
    ) -> Result<PageStream<'static, Tweet>> {
        self.paginate(&endpoints::SEARCH_RECENT, params.param("query", query), None)
    }

    pub async fn create_tweet(&self, request: &CreateTweetRequest) -> Result<Tweet> {
        let body = serde_json::to_value(request)?;
        self.single(&endpoints::CREATE_TWEET, RequestParams::new().json_body(body))
            .await
    }

    pub async fn delete_tweet(&self, tweet_id: &str) -> Result<BooleanResult> {
        self.single(&endpoints::DELETE_TWEET, RequestParams::new().path("id", tweet_id))
            .await
    }

    pub async fn like_tweet(&self, user_id: &str, tweet_id: &str) -> Result<BooleanResult> {
        let params = RequestParams::new()
            .path("id", user_id)
            .json_body(json!({ "tweet_id": tweet_id }));
        self.single(&endpoints::LIKE_TWEET, params).await
    }

    pub async fn unlike_tweet(&self, user_id: &str, tweet_id: &str) -> Result<BooleanResult> {
        let params = RequestParams::new()
            .path("id", user_id)
            .path("tweet_id", tweet_id);
        self.single(&endpoints::UNLIKE_TWEET, params).await
    }

    pub async fn retweet(&self, user_id: &str, tweet_id: &str) -> Result<BooleanResult> {
        let params = RequestParams::new()
            .path("id", user_id)
            .json_body(json!({ "tweet_id": tweet_id }));
        self.single(&endpoints::RETWEET, params).await
    }

    // Users

    pub async fn get_me(&self, params: RequestParams) -> Result<User> {
        self.single(&endpoints::GET_ME, params).await
    }

    pub fn get_follower_users(
        &self,
        user_id: &str,
        params: RequestParams,
    ) -> Result<PageStream<'static, User>> {
        self.paginate(&endpoints::FOLLOWERS, params.path("id", user_id), None)
    }

    pub async fn follow_user(&self, user_id: &str, target_user_id: &str) -> Result<BooleanResult> {
        let params = RequestParams::new()
            .path("id", user_id)
            .json_body(json!({ "target_user_id": target_user_id }));
        self.single(&endpoints::FOLLOW_USER, params).await
    }

    pub async fn unfollow_user(
        &self,
        user_id: &str,
        target_user_id: &str,
    ) -> Result<BooleanResult> {
        let params = RequestParams::new()
            .path("source_user_id", user_id)
            .path("target_user_id", target_user_id);
        self.single(&endpoints::UNFOLLOW_USER, params).await
    }

    // Lists

    pub fn get_list_members(
        &self,
        list_id: &str,
        params: RequestParams,
    ) -> Result<PageStream<'static, User>> {
        self.paginate(&endpoints::LIST_MEMBERS, params.path("id", list_id), None)
    }

    pub async fn create_list(&self, request: &CreateListRequest) -> Result<TwitterList> {
        let body = serde_json::to_value(request)?;
        self.single(&endpoints::CREATE_LIST, RequestParams::new().json_body(body))
            .await
    }

    pub async fn add_list_member(&self, list_id: &str, user_id: &str) -> Result<BooleanResult> {
        let params = RequestParams::new()
            .path("id", list_id)
            .json_body(json!({ "user_id": user_id }));
        self.single(&endpoints::ADD_LIST_MEMBER, params).await
    }

    // Spaces

    pub async fn get_spaces<I, S>(
        &self,
        ids: I,
        params: RequestParams,
    ) -> Result<ResponseEnvelope<Space>>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.call(&endpoints::GET_SPACES, params.list("ids", ids)).await
    }

    /// Calls an endpoint that answers with a single object in `data`.
    async fn single<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: RequestParams,
    ) -> Result<T> {
        self.call(endpoint, params).await?.into_single().ok_or_else(|| {
            TwitterError::ParseError(format!("{} returned no data", endpoint.name))
        })
    }

    // Media

    /// Fresh session for a manually driven INIT/APPEND/FINALIZE sequence.
    pub fn media_session(&self) -> ChunkedUploadSession {
        self.uploader.session()
    }

    pub fn media_uploader(&self) -> &MediaUploader {
        &self.uploader
    }

    /// Upload an in-memory buffer in chunks.
    pub async fn upload_media(
        &self,
        bytes: impl Into<Bytes>,
        media_type: &str,
        media_category: &str,
    ) -> Result<MediaUploadResult> {
        self.uploader
            .upload(bytes, media_type, media_category)
            .await
    }

    /// Upload a file, detecting media type and category.
    pub async fn upload_media_file(&self, path: impl AsRef<Path>) -> Result<MediaUploadResult> {
        self.uploader.upload_file(path).await
    }
}

/// Builder for [`TwitterClient`].
#[derive(Default)]
pub struct TwitterClientBuilder {
    base_url: Option<String>,
    upload_url: Option<String>,
    bearer_token: Option<SecretString>,
    http_config: HttpConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    upload_options: UploadOptions,
}

impl TwitterClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// API root, default `https://api.twitter.com/2`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Media upload endpoint.
    pub fn upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = Some(url.into());
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(SecretString::from(token.into()));
        self
    }

    /// Read the bearer token from `TWITTER_BEARER_TOKEN`.
    pub fn bearer_token_from_env(self) -> Result<Self> {
        let token = std::env::var(defaults::endpoints::BEARER_TOKEN_ENV).map_err(|_| {
            TwitterError::ConfigurationError(format!(
                "{} is not set",
                defaults::endpoints::BEARER_TOKEN_ENV
            ))
        })?;
        Ok(self.bearer_token(token))
    }

    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    /// Replace the reqwest transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// APPEND segment size for composite uploads.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.upload_options.chunk_size = chunk_size;
        self
    }

    /// Retry APPEND transport failures in composite uploads.
    pub fn segment_retry(mut self, policy: RetryPolicy) -> Self {
        self.upload_options.segment_retry = Some(policy);
        self
    }

    pub fn upload_options(mut self, options: UploadOptions) -> Self {
        self.upload_options = options;
        self
    }

    pub fn build(self) -> Result<TwitterClient> {
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::from_config(&self.http_config)?),
        };

        let mut headers = HttpHeaderBuilder::new()
            .with_json_accept()
            .with_custom_headers(&self.http_config.headers)?;
        if let Some(token) = &self.bearer_token {
            headers = headers.with_bearer_auth(token.expose_secret())?;
        }
        let headers = headers.build();

        let base_url = self
            .base_url
            .unwrap_or_else(|| defaults::endpoints::API_BASE_URL.to_string());
        let upload_url = self
            .upload_url
            .unwrap_or_else(|| defaults::endpoints::MEDIA_UPLOAD_URL.to_string());

        let uploader = MediaUploader::new(
            transport.clone(),
            upload_url.clone(),
            headers.clone(),
            self.upload_options,
        )?;

        Ok(TwitterClient {
            transport,
            base_url,
            upload_url,
            headers,
            uploader,
        })
    }
}

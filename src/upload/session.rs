//! INIT / APPEND / FINALIZE state machine.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::HeaderMap;

use crate::encoding::{decode_json, error_from_response};
use crate::error::{Result, TwitterError};
use crate::execution::http::{
    HttpBody, HttpTransport, HttpTransportRequest, MultipartBody, MultipartFile,
};
use crate::retry::RetryPolicy;
use crate::types::ProcessingInfo;
use crate::types::media::MediaIdResponse;

/// Lifecycle of a [`ChunkedUploadSession`].
///
/// `Created -> Initialized -> Appending* -> Finalized`; any failure from a
/// non-terminal state moves to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Created,
    Initialized,
    Appending,
    Finalized,
    Failed,
}

impl UploadState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finalized | Self::Failed)
    }
}

/// One chunked media upload.
///
/// Operations take `&mut self` and must be awaited one after another;
/// segment order is part of the protocol. Dropping the session abandons the
/// upload; there is no server-side abort call.
pub struct ChunkedUploadSession {
    transport: Arc<dyn HttpTransport>,
    upload_url: String,
    headers: HeaderMap,
    state: UploadState,
    media_id: Option<u64>,
    total_size: u64,
    media_type: String,
    media_category: String,
    next_segment_index: u64,
    bytes_sent: u64,
    processing_info: Option<ProcessingInfo>,
}

impl std::fmt::Debug for ChunkedUploadSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedUploadSession")
            .field("upload_url", &self.upload_url)
            .field("state", &self.state)
            .field("media_id", &self.media_id)
            .field("total_size", &self.total_size)
            .field("media_type", &self.media_type)
            .field("media_category", &self.media_category)
            .field("next_segment_index", &self.next_segment_index)
            .field("bytes_sent", &self.bytes_sent)
            .finish()
    }
}

impl ChunkedUploadSession {
    /// New session in state `Created`. `headers` (typically authorization)
    /// are sent with every call.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        upload_url: impl Into<String>,
        headers: HeaderMap,
    ) -> Self {
        Self {
            transport,
            upload_url: upload_url.into(),
            headers,
            state: UploadState::Created,
            media_id: None,
            total_size: 0,
            media_type: String::new(),
            media_category: String::new(),
            next_segment_index: 0,
            bytes_sent: 0,
            processing_info: None,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Provisional id after INIT, authoritative id after FINALIZE.
    pub fn media_id(&self) -> Option<u64> {
        self.media_id
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn media_category(&self) -> &str {
        &self.media_category
    }

    /// Index the next APPEND must carry.
    pub fn next_segment_index(&self) -> u64 {
        self.next_segment_index
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Processing status reported by FINALIZE, for media that is transcoded
    /// server-side.
    pub fn processing_info(&self) -> Option<&ProcessingInfo> {
        self.processing_info.as_ref()
    }

    /// Record `err` as fatal for this session and hand it back.
    fn fail(&mut self, err: TwitterError) -> TwitterError {
        if !self.state.is_terminal() {
            tracing::debug!(
                media_id = ?self.media_id,
                from = ?self.state,
                error = %err,
                "upload session failed"
            );
            self.state = UploadState::Failed;
        }
        err
    }

    fn violation(&mut self, message: String) -> TwitterError {
        self.fail(TwitterError::protocol_violation(message))
    }

    fn ensure_media_id(&mut self, media_id: u64, op: &str) -> Result<()> {
        match self.media_id {
            Some(id) if id == media_id => Ok(()),
            Some(id) => Err(self.violation(format!(
                "{op} for media {media_id} on session for media {id}"
            ))),
            None => Err(self.violation(format!("{op} before INIT"))),
        }
    }

    fn request(&self, body: HttpBody) -> HttpTransportRequest {
        HttpTransportRequest::new(Method::POST, self.upload_url.clone())
            .with_headers(self.headers.clone())
            .with_body(body)
    }

    /// INIT: declare the upload and obtain the provisional media id.
    pub async fn initialize(
        &mut self,
        total_size: u64,
        media_type: &str,
        media_category: &str,
    ) -> Result<u64> {
        if self.state != UploadState::Created {
            return Err(self.violation(format!("INIT in state {:?}", self.state)));
        }
        if total_size == 0 {
            return Err(self.violation("INIT with total_size 0".to_string()));
        }
        if media_type.is_empty() {
            return Err(self.fail(TwitterError::InvalidParameter(
                "media_type must not be empty".to_string(),
            )));
        }

        let mut fields = vec![
            ("command".to_string(), "INIT".to_string()),
            ("total_bytes".to_string(), total_size.to_string()),
            ("media_type".to_string(), media_type.to_string()),
        ];
        if !media_category.is_empty() {
            fields.push(("media_category".to_string(), media_category.to_string()));
        }

        let result = match self.transport.execute(self.request(HttpBody::Form(fields))).await {
            Ok(resp) => decode_json::<MediaIdResponse>(resp.status, &resp.body)
                .and_then(|body| body.id()),
            Err(e) => Err(e),
        };
        let media_id = result.map_err(|e| self.fail(e))?;

        tracing::debug!(media_id, total_size, media_type, media_category, "upload initialized");
        self.media_id = Some(media_id);
        self.total_size = total_size;
        self.media_type = media_type.to_string();
        self.media_category = media_category.to_string();
        self.state = UploadState::Initialized;
        Ok(media_id)
    }

    /// APPEND one segment.
    ///
    /// `segment_index` must equal [`Self::next_segment_index`]. A transport
    /// failure leaves the session as it was so the same segment can be sent
    /// again; an API error fails the session.
    pub async fn append_segment(
        &mut self,
        media_id: u64,
        segment_index: u64,
        payload: impl Into<Bytes>,
    ) -> Result<()> {
        let payload = payload.into();
        match self.state {
            UploadState::Initialized | UploadState::Appending => {}
            state => return Err(self.violation(format!("APPEND in state {state:?}"))),
        }
        self.ensure_media_id(media_id, "APPEND")?;
        if segment_index != self.next_segment_index {
            return Err(self.violation(format!(
                "segment {segment_index} sent, expected segment {}",
                self.next_segment_index
            )));
        }
        if payload.is_empty() {
            return Err(self.violation(format!("segment {segment_index} is empty")));
        }
        let len = payload.len() as u64;
        if self.bytes_sent + len > self.total_size {
            return Err(self.violation(format!(
                "segment {segment_index} would bring the upload to {} of {} declared bytes",
                self.bytes_sent + len,
                self.total_size
            )));
        }

        let body = MultipartBody {
            fields: vec![
                ("command".to_string(), "APPEND".to_string()),
                ("media_id".to_string(), media_id.to_string()),
                ("segment_index".to_string(), segment_index.to_string()),
            ],
            file: Some(MultipartFile {
                name: "media".to_string(),
                file_name: "media".to_string(),
                content_type: Some("application/octet-stream".to_string()),
                bytes: payload,
            }),
        };
        let result = match self.transport.execute(self.request(HttpBody::Multipart(body))).await {
            Ok(resp) if resp.is_success() => Ok(()),
            Ok(resp) => Err(error_from_response(resp.status, &resp.body)),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                self.bytes_sent += len;
                self.next_segment_index += 1;
                self.state = UploadState::Appending;
                tracing::debug!(
                    media_id,
                    segment_index,
                    bytes_sent = self.bytes_sent,
                    total_size = self.total_size,
                    "segment appended"
                );
                Ok(())
            }
            Err(e) if e.is_transport() => {
                tracing::warn!(media_id, segment_index, error = %e, "segment append interrupted");
                Err(e)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// [`Self::append_segment`], repeating transport failures as `policy`
    /// allows. Every attempt carries the same index and payload.
    pub async fn append_segment_with_retry(
        &mut self,
        media_id: u64,
        segment_index: u64,
        payload: impl Into<Bytes>,
        policy: &RetryPolicy,
    ) -> Result<()> {
        let payload = payload.into();
        let mut attempt = 0;
        loop {
            match self
                .append_segment(media_id, segment_index, payload.clone())
                .await
            {
                Ok(()) => return Ok(()),
                Err(e) if policy.should_retry(&e, attempt) => {
                    let delay = policy.calculate_delay(attempt);
                    tracing::debug!(segment_index, attempt, ?delay, "retrying segment");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// FINALIZE: close the upload once every declared byte has been sent.
    ///
    /// Returns the authoritative media id, which may differ from the INIT
    /// one. Any failure fails the session.
    pub async fn finalize(&mut self, media_id: u64) -> Result<u64> {
        let ready_state = match self.state {
            UploadState::Appending => true,
            UploadState::Initialized => self.total_size == 0,
            _ => false,
        };
        if !ready_state {
            return Err(self.violation(format!("FINALIZE in state {:?}", self.state)));
        }
        self.ensure_media_id(media_id, "FINALIZE")?;
        if self.bytes_sent < self.total_size {
            return Err(self.violation(format!(
                "FINALIZE after {} of {} declared bytes",
                self.bytes_sent, self.total_size
            )));
        }

        let fields = vec![
            ("command".to_string(), "FINALIZE".to_string()),
            ("media_id".to_string(), media_id.to_string()),
        ];
        let result = match self.transport.execute(self.request(HttpBody::Form(fields))).await {
            Ok(resp) => decode_json::<MediaIdResponse>(resp.status, &resp.body),
            Err(e) => Err(e),
        };
        let body = result.map_err(|e| self.fail(e))?;
        let final_id = body.id().map_err(|e| self.fail(e))?;

        tracing::debug!(
            provisional = media_id,
            media_id = final_id,
            processing = ?body.processing_info.as_ref().map(|p| p.state),
            "upload finalized"
        );
        self.media_id = Some(final_id);
        self.processing_info = body.processing_info;
        self.state = UploadState::Finalized;
        Ok(final_id)
    }
}

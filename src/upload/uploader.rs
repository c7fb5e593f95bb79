//! One-call uploads on top of [`ChunkedUploadSession`].

use std::path::Path;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use reqwest::header::HeaderMap;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt};

use super::session::ChunkedUploadSession;
use crate::defaults::upload::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::error::{Result, TwitterError};
use crate::execution::http::HttpTransport;
use crate::retry::RetryPolicy;
use crate::types::MediaUploadResult;
use crate::utils::mime::{guess_mime, is_uploadable, media_category_for};

/// Bytes inspected for magic-number detection in `upload_file`.
const SNIFF_LEN: usize = 8 * 1024;

/// Tuning for composite uploads.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// APPEND segment size in bytes, `1..=MAX_CHUNK_SIZE`.
    pub chunk_size: usize,
    /// Retry APPEND transport failures. `None` (default) surfaces the first
    /// failure.
    pub segment_retry: Option<RetryPolicy>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            segment_retry: None,
        }
    }
}

impl UploadOptions {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_segment_retry(mut self, policy: RetryPolicy) -> Self {
        self.segment_retry = Some(policy);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(TwitterError::ConfigurationError(format!(
                "chunk_size must be between 1 and {MAX_CHUNK_SIZE}, got {}",
                self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Runs complete INIT/APPEND/FINALIZE sequences.
///
/// Independent uploads may run concurrently from clones of the same
/// uploader; each uses its own session.
#[derive(Clone)]
pub struct MediaUploader {
    transport: Arc<dyn HttpTransport>,
    upload_url: String,
    headers: HeaderMap,
    options: UploadOptions,
}

impl MediaUploader {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        upload_url: impl Into<String>,
        headers: HeaderMap,
        options: UploadOptions,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            transport,
            upload_url: upload_url.into(),
            headers,
            options,
        })
    }

    pub fn options(&self) -> &UploadOptions {
        &self.options
    }

    /// Fresh session for manual INIT/APPEND/FINALIZE control.
    pub fn session(&self) -> ChunkedUploadSession {
        ChunkedUploadSession::new(
            self.transport.clone(),
            self.upload_url.clone(),
            self.headers.clone(),
        )
    }

    async fn append(
        &self,
        session: &mut ChunkedUploadSession,
        media_id: u64,
        index: u64,
        chunk: Bytes,
    ) -> Result<()> {
        match &self.options.segment_retry {
            Some(policy) => {
                session
                    .append_segment_with_retry(media_id, index, chunk, policy)
                    .await
            }
            None => session.append_segment(media_id, index, chunk).await,
        }
    }

    async fn finish(
        session: &mut ChunkedUploadSession,
        media_id: u64,
    ) -> Result<MediaUploadResult> {
        let media_id = session.finalize(media_id).await?;
        Ok(MediaUploadResult {
            media_id,
            processing_info: session.processing_info().cloned(),
        })
    }

    /// Upload an in-memory buffer.
    pub async fn upload(
        &self,
        bytes: impl Into<Bytes>,
        media_type: &str,
        media_category: &str,
    ) -> Result<MediaUploadResult> {
        let bytes = bytes.into();
        let mut session = self.session();
        let media_id = session
            .initialize(bytes.len() as u64, media_type, media_category)
            .await?;

        let chunk_size = self.options.chunk_size;
        let mut offset = 0;
        let mut index = 0;
        while offset < bytes.len() {
            let end = (offset + chunk_size).min(bytes.len());
            self.append(&mut session, media_id, index, bytes.slice(offset..end))
                .await?;
            offset = end;
            index += 1;
        }

        Self::finish(&mut session, media_id).await
    }

    /// Upload `total_size` bytes read from `reader`.
    ///
    /// Fails if the reader ends early; a reader longer than `total_size` is
    /// rejected when the surplus would be appended.
    pub async fn upload_reader<R>(
        &self,
        mut reader: R,
        total_size: u64,
        media_type: &str,
        media_category: &str,
    ) -> Result<MediaUploadResult>
    where
        R: AsyncRead + Unpin,
    {
        let mut session = self.session();
        let media_id = session
            .initialize(total_size, media_type, media_category)
            .await?;

        let mut index = 0;
        loop {
            let chunk = read_chunk(&mut reader, self.options.chunk_size).await?;
            if chunk.is_empty() {
                break;
            }
            self.append(&mut session, media_id, index, chunk).await?;
            index += 1;
        }

        if session.bytes_sent() < total_size {
            return Err(TwitterError::IoError(format!(
                "input ended after {} of {} declared bytes",
                session.bytes_sent(),
                total_size
            )));
        }
        Self::finish(&mut session, media_id).await
    }

    /// Upload a file, detecting its media type and category.
    ///
    /// Files that are neither `image/*` nor `video/*` are rejected before
    /// INIT.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> Result<MediaUploadResult> {
        let path = path.as_ref();
        let mut file = tokio::fs::File::open(path).await?;
        let total_size = file.metadata().await?.len();

        let head = read_chunk(&mut file, SNIFF_LEN).await?;
        file.rewind().await?;

        let media_type = guess_mime(Some(head.as_ref()), Some(path));
        if !is_uploadable(&media_type) {
            return Err(TwitterError::InvalidParameter(format!(
                "{} has media type {media_type}, expected an image or video",
                path.display()
            )));
        }
        let media_category = media_category_for(&media_type);
        tracing::debug!(
            path = %path.display(),
            media_type = %media_type,
            media_category,
            total_size,
            "uploading file"
        );

        self.upload_reader(file, total_size, &media_type, media_category)
            .await
    }
}

/// Read up to `limit` bytes, stopping early only at end of input.
async fn read_chunk<R>(reader: &mut R, limit: usize) -> Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(limit);
    while buf.len() < limit {
        let mut limited = (&mut *reader).take((limit - buf.len()) as u64);
        let n = limited.read_buf(&mut buf).await?;
        if n == 0 {
            break;
        }
    }
    Ok(buf.freeze())
}

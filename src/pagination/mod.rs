//! Cursor pagination over `meta.next_token`.
//!
//! [`PaginationCursor`] is the manual API: each [`PaginationCursor::next_page`]
//! issues at most one request through the caller's fetch function. [`paginate`]
//! wraps a cursor into a lazy [`Stream`] of pages.
//!
//! Tokens are opaque strings. The cursor never builds, edits or re-orders
//! them; it only remembers the last one the server handed out.

use std::future::Future;
use std::pin::Pin;

use futures_util::Stream;

use crate::error::Result;
use crate::types::ResponseEnvelope;

/// Boxed page stream returned by the client.
pub type PageStream<'a, T> = Pin<Box<dyn Stream<Item = Result<ResponseEnvelope<T>>> + Send + 'a>>;

/// Forward-only position in a paginated listing.
///
/// Not shared between tasks: `next_page` takes `&mut self`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    token: Option<String>,
    exhausted: bool,
    pages: u64,
}

impl PaginationCursor {
    /// Cursor positioned at the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor resuming from a token obtained earlier. `None` or an empty
    /// string mean the first page.
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            ..Self::default()
        }
    }

    /// Token the next request will carry.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Pages successfully fetched through this cursor.
    pub fn pages_fetched(&self) -> u64 {
        self.pages
    }

    /// Fetch the page at the current position.
    ///
    /// Returns `Ok(None)` without calling `fetch` once the listing is
    /// exhausted. On error the cursor is left exactly as it was, so calling
    /// again requests the same token.
    pub async fn next_page<T, F, Fut>(&mut self, fetch: F) -> Result<Option<ResponseEnvelope<T>>>
    where
        F: FnOnce(Option<String>) -> Fut,
        Fut: Future<Output = Result<ResponseEnvelope<T>>>,
    {
        if self.exhausted {
            return Ok(None);
        }

        let requested = self.token.clone();
        let page = match fetch(requested.clone()).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!(
                    token = ?requested,
                    error = %e,
                    "page fetch failed, cursor unchanged"
                );
                return Err(e);
            }
        };

        self.pages += 1;
        match page.next_token() {
            None => {
                tracing::debug!(pages = self.pages, "pagination exhausted");
                self.exhausted = true;
            }
            Some(next) if requested.as_deref() == Some(next) => {
                // Following the same token again would never terminate.
                tracing::warn!(
                    token = next,
                    "server returned the token it was given, stopping pagination"
                );
                self.exhausted = true;
            }
            Some(next) => {
                self.token = Some(next.to_string());
            }
        }
        Ok(Some(page))
    }
}

/// Lazily walk every page starting at `initial_token`.
///
/// Each poll issues at most one request. The stream ends after the page
/// without a next token, or right after yielding any error that is not a
/// transport error (API errors, parse errors, invalid parameters).
///
/// A transport error leaves the position untouched and the stream open:
/// polling again retries the same token, so a caller that keeps polling
/// through a dead network keeps sending requests. Stop polling or drop the
/// stream to give up. To continue after an API error, drive a
/// [`PaginationCursor`] directly.
pub fn paginate<T, F, Fut>(
    mut fetch: F,
    initial_token: Option<String>,
) -> impl Stream<Item = Result<ResponseEnvelope<T>>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ResponseEnvelope<T>>>,
{
    let mut cursor = PaginationCursor::from_token(initial_token);
    async_stream::stream! {
        loop {
            match cursor.next_page(&mut fetch).await {
                Ok(Some(page)) => yield Ok(page),
                Ok(None) => break,
                Err(e) if e.is_transport() => yield Err(e),
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }
    }
}

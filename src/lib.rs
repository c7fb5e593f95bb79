//! twitter-v2
//!
//! Typed client core for the Twitter API v2: a generic endpoint call
//! primitive, cursor pagination over `meta.next_token`, and the chunked
//! INIT/APPEND/FINALIZE media upload protocol.
#![deny(unsafe_code)]

pub mod client;
pub mod defaults;
pub mod encoding;
pub mod error;
pub mod execution;
pub mod pagination;
pub mod params;
pub mod retry;
pub mod types;
pub mod upload;
pub mod utils;

pub use client::{TwitterClient, TwitterClientBuilder};
pub use error::{Result, TwitterError};

/// Commonly used items.
pub mod prelude {
    pub use crate::client::{TwitterClient, TwitterClientBuilder};
    pub use crate::error::{ApiErrorObject, ErrorCategory, TwitterError};
    pub use crate::execution::http::{HttpTransport, HttpTransportRequest, HttpTransportResponse};
    pub use crate::pagination::{PageStream, PaginationCursor, paginate};
    pub use crate::params::{FieldSelection, RequestParams, endpoints};
    pub use crate::retry::RetryPolicy;
    pub use crate::types::{
        BooleanResult, CreateListRequest, CreateTweetRequest, MediaUploadResult, Meta,
        ResponseEnvelope, Space, Tweet, TwitterList, User,
    };
    pub use crate::upload::{ChunkedUploadSession, MediaUploader, UploadOptions, UploadState};
}

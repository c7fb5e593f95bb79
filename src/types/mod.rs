//! Core types: HTTP configuration, the response envelope, domain records and
//! media upload payloads.

pub mod envelope;
pub mod http;
pub mod media;
pub mod models;
pub mod requests;

pub use envelope::{Meta, ResponseEnvelope};
pub use http::{HttpConfig, HttpConfigBuilder};
pub use media::{MediaUploadResult, ProcessingInfo, ProcessingState};
pub use models::{BooleanResult, Space, Tweet, TweetCount, TwitterList, User};
pub use requests::{CreateListRequest, CreateTweetRequest, ReplySettings};

//! Chunked media upload.
//!
//! [`ChunkedUploadSession`] exposes the three protocol calls for callers that
//! drive the upload themselves; [`MediaUploader`] runs the whole sequence for
//! a buffer, a reader or a file.

mod session;
mod uploader;

pub use session::{ChunkedUploadSession, UploadState};
pub use uploader::{MediaUploader, UploadOptions};

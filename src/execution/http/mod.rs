//! HTTP Utilities
//!
//! This module contains HTTP-related utilities:
//! - The injectable transport abstraction and its reqwest implementation
//! - Header management

pub mod headers;
pub mod reqwest_transport;
pub mod transport;

pub use headers::HttpHeaderBuilder;
pub use reqwest_transport::ReqwestTransport;
pub use transport::{
    HttpBody, HttpTransport, HttpTransportRequest, HttpTransportResponse, MultipartBody,
    MultipartFile,
};

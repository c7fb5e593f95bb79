//! Error Handling Module
//!
//! This module provides error handling for the client, including:
//! - Core error types (`TwitterError`, `ErrorCategory`)
//! - Constructors and classification helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use twitter_v2::error::{TwitterError, ErrorCategory};
//!
//! let error = TwitterError::protocol_violation("segment 3 sent before segment 2");
//! assert_eq!(error.category(), ErrorCategory::Protocol);
//! assert!(!error.is_retryable());
//! ```

pub mod helpers;
pub mod types;

pub use types::*;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TwitterError>;

//! Retry Mechanisms
//!
//! Nothing in the client retries on its own. [`RetryPolicy`] is an opt-in
//! knob for repeating steps that are safe to repeat: APPEND segments after a
//! transport failure (see `UploadOptions::segment_retry`).

mod policy;

pub use policy::RetryPolicy;

//! Response decoding.

pub mod envelope;

pub use envelope::{decode_envelope, decode_json, error_from_response};

//! Chunked media upload payloads.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwitterError};

/// Server-side processing state reported by FINALIZE (and STATUS) for media
/// that needs transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    Pending,
    InProgress,
    Failed,
    Succeeded,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub state: ProcessingState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_after_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

/// Body returned by INIT and FINALIZE.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MediaIdResponse {
    #[serde(default)]
    pub media_id: Option<u64>,
    #[serde(default)]
    pub media_id_string: Option<String>,
    #[serde(default)]
    pub processing_info: Option<ProcessingInfo>,
}

impl MediaIdResponse {
    pub fn id(&self) -> Result<u64> {
        if let Some(id) = self.media_id {
            return Ok(id);
        }
        self.media_id_string
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| TwitterError::ParseError("response carries no media_id".to_string()))
    }
}

/// Outcome of a completed chunked upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUploadResult {
    /// Authoritative media id from FINALIZE.
    pub media_id: u64,
    /// Present when the media still needs server-side processing.
    pub processing_info: Option<ProcessingInfo>,
}

impl MediaUploadResult {
    /// `media_id` as the string form used in tweet bodies.
    pub fn media_id_string(&self) -> String {
        self.media_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_id_falls_back_to_string_form() {
        let resp: MediaIdResponse =
            serde_json::from_str(r#"{"media_id_string":"710511363345354753"}"#).unwrap();
        assert_eq!(resp.id().unwrap(), 710511363345354753);
    }

    #[test]
    fn processing_info_decodes_known_and_unknown_states() {
        let resp: MediaIdResponse = serde_json::from_str(
            r#"{"media_id":1,"processing_info":{"state":"in_progress","check_after_secs":5,"progress_percent":8}}"#,
        )
        .unwrap();
        let info = resp.processing_info.unwrap();
        assert_eq!(info.state, ProcessingState::InProgress);
        assert_eq!(info.check_after_secs, Some(5));

        let info: ProcessingInfo = serde_json::from_str(r#"{"state":"queued"}"#).unwrap();
        assert_eq!(info.state, ProcessingState::Unknown);
    }

    #[test]
    fn missing_media_id_is_a_parse_error() {
        let resp: MediaIdResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(resp.id(), Err(TwitterError::ParseError(_))));
    }
}

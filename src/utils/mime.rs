//! MIME type detection utilities

use crate::defaults::upload::{CATEGORY_GIF, CATEGORY_IMAGE, CATEGORY_VIDEO};

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file path (extension-based)
pub fn guess_mime_from_path(path: &std::path::Path) -> Option<String> {
    mime_guess::from_path(path)
        .first_raw()
        .map(|s| s.to_string())
}

/// Combined guess: prefer bytes, fall back to extension, otherwise octet-stream
pub fn guess_mime(bytes: Option<&[u8]>, path: Option<&std::path::Path>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(p) = path
        && let Some(m) = guess_mime_from_path(p)
    {
        return m;
    }
    "application/octet-stream".to_string()
}

/// Whether the media upload endpoint takes this type at all.
pub fn is_uploadable(media_type: &str) -> bool {
    media_type.starts_with("image/") || media_type.starts_with("video/")
}

/// Upload category matching a media type.
pub fn media_category_for(media_type: &str) -> &'static str {
    if media_type.eq_ignore_ascii_case("image/gif") {
        CATEGORY_GIF
    } else if media_type.starts_with("video/") {
        CATEGORY_VIDEO
    } else {
        CATEGORY_IMAGE
    }
}

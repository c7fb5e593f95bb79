//! Default Configuration Values
//!
//! Centralizes the default values used throughout the client.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    ///
    /// Media APPEND calls carry several MiB each, so this is generous.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("twitter-v2/", env!("CARGO_PKG_VERSION"));
}

/// Base URLs
pub mod endpoints {
    /// API v2 root.
    pub const API_BASE_URL: &str = "https://api.twitter.com/2";

    /// Chunked media upload endpoint (still served by the v1.1 upload host).
    pub const MEDIA_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";

    /// Environment variable read by `TwitterClientBuilder::bearer_token_from_env`.
    pub const BEARER_TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";
}

/// Chunked upload tuning
pub mod upload {
    /// Default APPEND segment size: 4 MiB.
    ///
    /// Not a protocol constant; any size up to [`MAX_CHUNK_SIZE`] is accepted
    /// by the server.
    pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024 * 1024;

    /// Largest segment the upload endpoint accepts (5 MB).
    pub const MAX_CHUNK_SIZE: usize = 5 * 1024 * 1024;

    pub const CATEGORY_IMAGE: &str = "tweet_image";
    pub const CATEGORY_GIF: &str = "tweet_gif";
    pub const CATEGORY_VIDEO: &str = "tweet_video";
}

/// Field selections applied when a caller leaves an endpoint's selector at
/// [`crate::params::FieldSelection::Default`].
pub mod fields {
    pub const EXPANSIONS: &str = "attachments.poll_ids,attachments.media_keys,author_id,entities.mentions.username,geo.place_id,in_reply_to_user_id,referenced_tweets.id,referenced_tweets.id.author_id";

    pub const MEDIA_FIELDS: &str = "duration_ms,height,media_key,preview_image_url,type,url,width,public_metrics,alt_text";

    pub const PLACE_FIELDS: &str =
        "contained_within,country,country_code,full_name,geo,id,name,place_type";

    pub const POLL_FIELDS: &str = "duration_minutes,end_datetime,id,options,voting_status";

    pub const TWEET_FIELDS: &str = "attachments,author_id,context_annotations,conversation_id,created_at,entities,geo,id,in_reply_to_user_id,lang,public_metrics,possibly_sensitive,referenced_tweets,reply_settings,source,text,withheld";

    pub const USER_FIELDS: &str = "created_at,description,entities,id,location,name,pinned_tweet_id,profile_image_url,protected,public_metrics,url,username,verified,withheld";
}

//! JSON bodies of write endpoints.

use serde::{Deserialize, Serialize};

/// Who may reply to a new tweet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplySettings {
    MentionedUsers,
    Following,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TweetMedia {
    /// Ids returned by a finished media upload.
    pub media_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tagged_user_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TweetPoll {
    pub options: Vec<String>,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TweetReply {
    pub in_reply_to_tweet_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_reply_user_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TweetGeo {
    pub place_id: String,
}

/// Body of `POST /2/tweets`. Unset fields are not sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateTweetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_message_deep_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_super_followers_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<TweetGeo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<TweetMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<TweetPoll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_tweet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<TweetReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_settings: Option<ReplySettings>,
}

impl CreateTweetRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_media_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.media = Some(TweetMedia {
            media_ids: ids.into_iter().map(|s| s.to_string()).collect(),
            tagged_user_ids: Vec::new(),
        });
        self
    }

    pub fn in_reply_to(mut self, tweet_id: impl Into<String>) -> Self {
        self.reply = Some(TweetReply {
            in_reply_to_tweet_id: tweet_id.into(),
            exclude_reply_user_ids: Vec::new(),
        });
        self
    }

    pub fn with_poll(mut self, options: Vec<String>, duration_minutes: u32) -> Self {
        self.poll = Some(TweetPoll {
            options,
            duration_minutes,
        });
        self
    }
}

/// Body of `POST /2/lists`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

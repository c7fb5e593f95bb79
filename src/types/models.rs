//! Domain records.
//!
//! Only the commonly used fields are typed; whatever else the server sends
//! (depending on the requested `*.fields`) lands in `extra`.

use serde::{Deserialize, Serialize};

type Extra = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A Twitter List (named to avoid clashing with `std` collections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterList {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One bucket of the tweet counts endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweetCount {
    pub start: String,
    pub end: String,
    pub tweet_count: u64,
}

/// Result of a write call that answers with a flag object such as
/// `{"liked": true}` or `{"following": true, "pending_follow": false}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct BooleanResult {
    pub fields: Extra,
}

impl BooleanResult {
    /// Value of a named flag.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(|v| v.as_bool())
    }

    /// The first boolean flag in the object.
    pub fn value(&self) -> Option<bool> {
        self.fields.values().find_map(|v| v.as_bool())
    }
}

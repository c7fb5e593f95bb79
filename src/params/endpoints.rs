//! Endpoint table.
//!
//! One `static` per endpoint. Listing endpoints carry the name of their
//! pagination token parameter: `next_token` for search and counts,
//! `pagination_token` everywhere else.

use super::HttpMethod;
use crate::defaults::fields;

/// Static description of one API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Identifier used in error messages.
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path below the API root, with `{name}` placeholders.
    pub path: &'static str,
    /// Accepted query parameter names (selectors included).
    pub query: &'static [&'static str],
    /// Query name of the pagination token, for listing endpoints.
    pub token_param: Option<&'static str>,
    /// Client-side defaults for selectors left at `FieldSelection::Default`.
    pub defaults: &'static [(&'static str, &'static str)],
}

impl Endpoint {
    pub const fn new(name: &'static str, method: HttpMethod, path: &'static str) -> Self {
        Self {
            name,
            method,
            path,
            query: &[],
            token_param: None,
            defaults: &[],
        }
    }

    pub const fn query(mut self, query: &'static [&'static str]) -> Self {
        self.query = query;
        self
    }

    pub const fn paginated(mut self, token_param: &'static str) -> Self {
        self.token_param = Some(token_param);
        self
    }

    pub const fn defaults(mut self, defaults: &'static [(&'static str, &'static str)]) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn is_paginated(&self) -> bool {
        self.token_param.is_some()
    }
}

const PAGINATION_TOKEN: &str = "pagination_token";
const NEXT_TOKEN: &str = "next_token";

const TWEET_SELECTORS: &[&str] = &[
    "expansions",
    "media.fields",
    "place.fields",
    "poll.fields",
    "tweet.fields",
    "user.fields",
];

const TIMELINE_QUERY: &[&str] = &[
    "end_time",
    "exclude",
    "max_results",
    "since_id",
    "start_time",
    "until_id",
    "expansions",
    "media.fields",
    "place.fields",
    "poll.fields",
    "tweet.fields",
    "user.fields",
];

const SEARCH_QUERY: &[&str] = &[
    "query",
    "end_time",
    "max_results",
    "since_id",
    "sort_order",
    "start_time",
    "until_id",
    "expansions",
    "media.fields",
    "place.fields",
    "poll.fields",
    "tweet.fields",
    "user.fields",
];

const COUNTS_QUERY: &[&str] = &[
    "query",
    "end_time",
    "granularity",
    "since_id",
    "start_time",
    "until_id",
];

const PAGED_TWEETS_QUERY: &[&str] = &[
    "max_results",
    "expansions",
    "media.fields",
    "place.fields",
    "poll.fields",
    "tweet.fields",
    "user.fields",
];

const USER_SELECTORS: &[&str] = &["expansions", "tweet.fields", "user.fields"];

const PAGED_USERS_QUERY: &[&str] = &["max_results", "expansions", "tweet.fields", "user.fields"];

const PAGED_LISTS_QUERY: &[&str] = &["max_results", "expansions", "list.fields", "user.fields"];

const LIST_SELECTORS: &[&str] = &["expansions", "list.fields", "user.fields"];

const TWEET_LOOKUP_DEFAULTS: &[(&str, &str)] = &[
    ("expansions", fields::EXPANSIONS),
    ("media.fields", fields::MEDIA_FIELDS),
    ("place.fields", fields::PLACE_FIELDS),
    ("poll.fields", fields::POLL_FIELDS),
    ("tweet.fields", fields::TWEET_FIELDS),
    ("user.fields", fields::USER_FIELDS),
];

const USER_LOOKUP_DEFAULTS: &[(&str, &str)] = &[
    ("expansions", "pinned_tweet_id"),
    ("tweet.fields", fields::TWEET_FIELDS),
    ("user.fields", fields::USER_FIELDS),
];

use HttpMethod::{Delete, Get, Post, Put};

// Tweets

pub static GET_TWEETS: Endpoint = Endpoint::new("get_tweets", Get, "/tweets")
    .query(&[
        "ids",
        "expansions",
        "media.fields",
        "place.fields",
        "poll.fields",
        "tweet.fields",
        "user.fields",
    ])
    .defaults(TWEET_LOOKUP_DEFAULTS);

pub static GET_TWEET: Endpoint = Endpoint::new("get_tweet", Get, "/tweets/{id}")
    .query(TWEET_SELECTORS)
    .defaults(TWEET_LOOKUP_DEFAULTS);

pub static CREATE_TWEET: Endpoint = Endpoint::new("create_tweet", Post, "/tweets");

pub static DELETE_TWEET: Endpoint = Endpoint::new("delete_tweet", Delete, "/tweets/{id}");

pub static USER_TWEETS: Endpoint = Endpoint::new("user_tweets", Get, "/users/{id}/tweets")
    .query(TIMELINE_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static USER_MENTIONS: Endpoint =
    Endpoint::new("user_mentions", Get, "/users/{id}/mentions")
        .query(TIMELINE_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static HOME_TIMELINE: Endpoint = Endpoint::new(
    "reverse_chronological_timeline",
    Get,
    "/users/{id}/timelines/reverse_chronological",
)
.query(TIMELINE_QUERY)
.paginated(PAGINATION_TOKEN);

pub static SEARCH_RECENT: Endpoint = Endpoint::new("search_recent", Get, "/tweets/search/recent")
    .query(SEARCH_QUERY)
    .paginated(NEXT_TOKEN);

pub static SEARCH_ALL: Endpoint = Endpoint::new("search_all", Get, "/tweets/search/all")
    .query(SEARCH_QUERY)
    .paginated(NEXT_TOKEN);

pub static COUNTS_RECENT: Endpoint =
    Endpoint::new("counts_recent", Get, "/tweets/counts/recent").query(COUNTS_QUERY);

pub static COUNTS_ALL: Endpoint = Endpoint::new("counts_all", Get, "/tweets/counts/all")
    .query(COUNTS_QUERY)
    .paginated(NEXT_TOKEN);

pub static RETWEETED_BY: Endpoint =
    Endpoint::new("retweeted_by", Get, "/tweets/{id}/retweeted_by")
        .query(PAGED_TWEETS_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static QUOTE_TWEETS: Endpoint =
    Endpoint::new("quote_tweets", Get, "/tweets/{id}/quote_tweets")
        .query(PAGED_TWEETS_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static RETWEET: Endpoint = Endpoint::new("retweet", Post, "/users/{id}/retweets");

pub static UNRETWEET: Endpoint =
    Endpoint::new("unretweet", Delete, "/users/{id}/retweets/{source_tweet_id}");

pub static LIKING_USERS: Endpoint =
    Endpoint::new("liking_users", Get, "/tweets/{id}/liking_users")
        .query(PAGED_TWEETS_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static LIKED_TWEETS: Endpoint =
    Endpoint::new("liked_tweets", Get, "/users/{id}/liked_tweets")
        .query(PAGED_TWEETS_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static LIKE_TWEET: Endpoint = Endpoint::new("like_tweet", Post, "/users/{id}/likes");

pub static UNLIKE_TWEET: Endpoint =
    Endpoint::new("unlike_tweet", Delete, "/users/{id}/likes/{tweet_id}");

pub static BOOKMARKS: Endpoint = Endpoint::new("bookmarks", Get, "/users/{id}/bookmarks")
    .query(PAGED_TWEETS_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static ADD_BOOKMARK: Endpoint =
    Endpoint::new("add_bookmark", Post, "/users/{id}/bookmarks");

pub static DELETE_BOOKMARK: Endpoint =
    Endpoint::new("delete_bookmark", Delete, "/users/{id}/bookmarks/{tweet_id}");

pub static HIDE_REPLY: Endpoint = Endpoint::new("hide_reply", Put, "/tweets/{id}/hidden");

// Users

pub static GET_USERS: Endpoint = Endpoint::new("get_users", Get, "/users")
    .query(&["ids", "expansions", "tweet.fields", "user.fields"])
    .defaults(USER_LOOKUP_DEFAULTS);

pub static GET_USERS_BY: Endpoint = Endpoint::new("get_users_by", Get, "/users/by")
    .query(&["usernames", "expansions", "tweet.fields", "user.fields"])
    .defaults(USER_LOOKUP_DEFAULTS);

pub static GET_ME: Endpoint = Endpoint::new("get_me", Get, "/users/me")
    .query(USER_SELECTORS)
    .defaults(USER_LOOKUP_DEFAULTS);

pub static FOLLOWING: Endpoint = Endpoint::new("following", Get, "/users/{id}/following")
    .query(PAGED_USERS_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static FOLLOWERS: Endpoint = Endpoint::new("followers", Get, "/users/{id}/followers")
    .query(PAGED_USERS_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static FOLLOW_USER: Endpoint = Endpoint::new("follow_user", Post, "/users/{id}/following");

pub static UNFOLLOW_USER: Endpoint = Endpoint::new(
    "unfollow_user",
    Delete,
    "/users/{source_user_id}/following/{target_user_id}",
);

pub static BLOCKING: Endpoint = Endpoint::new("blocking", Get, "/users/{id}/blocking")
    .query(PAGED_USERS_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static BLOCK_USER: Endpoint = Endpoint::new("block_user", Post, "/users/{id}/blocking");

pub static UNBLOCK_USER: Endpoint = Endpoint::new(
    "unblock_user",
    Delete,
    "/users/{source_user_id}/blocking/{target_user_id}",
);

pub static MUTING: Endpoint = Endpoint::new("muting", Get, "/users/{id}/muting")
    .query(PAGED_USERS_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static MUTE_USER: Endpoint = Endpoint::new("mute_user", Post, "/users/{id}/muting");

pub static UNMUTE_USER: Endpoint = Endpoint::new(
    "unmute_user",
    Delete,
    "/users/{source_user_id}/muting/{target_user_id}",
);

// Spaces

pub static GET_SPACES: Endpoint = Endpoint::new("get_spaces", Get, "/spaces")
    .query(&["ids", "expansions", "space.fields", "user.fields"]);

pub static SPACES_BY_CREATOR: Endpoint =
    Endpoint::new("spaces_by_creator_ids", Get, "/spaces/by/creator_ids")
        .query(&["user_ids", "expansions", "space.fields", "user.fields"]);

pub static SEARCH_SPACES: Endpoint = Endpoint::new("search_spaces", Get, "/spaces/search")
    .query(&["query", "state", "max_results", "expansions", "space.fields", "user.fields"]);

// Lists

pub static GET_LIST: Endpoint = Endpoint::new("get_list", Get, "/lists/{id}").query(LIST_SELECTORS);

pub static OWNED_LISTS: Endpoint = Endpoint::new("owned_lists", Get, "/users/{id}/owned_lists")
    .query(PAGED_LISTS_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static LIST_TWEETS: Endpoint = Endpoint::new("list_tweets", Get, "/lists/{id}/tweets")
    .query(&["max_results", "expansions", "tweet.fields", "user.fields"])
    .paginated(PAGINATION_TOKEN);

pub static LIST_MEMBERS: Endpoint = Endpoint::new("list_members", Get, "/lists/{id}/members")
    .query(PAGED_USERS_QUERY)
    .paginated(PAGINATION_TOKEN);

pub static LIST_MEMBERSHIPS: Endpoint =
    Endpoint::new("list_memberships", Get, "/users/{id}/list_memberships")
        .query(PAGED_LISTS_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static LIST_FOLLOWERS: Endpoint =
    Endpoint::new("list_followers", Get, "/lists/{id}/followers")
        .query(PAGED_USERS_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static FOLLOWED_LISTS: Endpoint =
    Endpoint::new("followed_lists", Get, "/users/{id}/followed_lists")
        .query(PAGED_LISTS_QUERY)
        .paginated(PAGINATION_TOKEN);

pub static PINNED_LISTS: Endpoint =
    Endpoint::new("pinned_lists", Get, "/users/{id}/pinned_lists").query(LIST_SELECTORS);

pub static CREATE_LIST: Endpoint = Endpoint::new("create_list", Post, "/lists");

pub static DELETE_LIST: Endpoint = Endpoint::new("delete_list", Delete, "/lists/{id}");

pub static ADD_LIST_MEMBER: Endpoint =
    Endpoint::new("add_list_member", Post, "/lists/{id}/members");

pub static REMOVE_LIST_MEMBER: Endpoint =
    Endpoint::new("remove_list_member", Delete, "/lists/{id}/members/{user_id}");

pub static FOLLOW_LIST: Endpoint =
    Endpoint::new("follow_list", Post, "/users/{id}/followed_lists");

pub static UNFOLLOW_LIST: Endpoint =
    Endpoint::new("unfollow_list", Delete, "/users/{id}/followed_lists/{list_id}");

pub static PIN_LIST: Endpoint = Endpoint::new("pin_list", Post, "/users/{id}/pinned_lists");

pub static UNPIN_LIST: Endpoint =
    Endpoint::new("unpin_list", Delete, "/users/{id}/pinned_lists/{list_id}");

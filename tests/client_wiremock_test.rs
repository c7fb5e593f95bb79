//! End-to-end against a mock server through the default reqwest transport.

use futures::TryStreamExt;
use serde_json::json;
use twitter_v2::prelude::*;
use wiremock::matchers::{
    body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> TwitterClient {
    TwitterClient::builder()
        .base_url(format!("{}/2", server.uri()))
        .upload_url(format!("{}/1.1/media/upload.json", server.uri()))
        .bearer_token("e2e-token")
        .chunk_size(4)
        .build()
        .expect("client")
}

#[tokio::test]
async fn pages_through_followers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/2244994945/followers"))
        .and(header("authorization", "Bearer e2e-token"))
        .and(query_param_is_missing("pagination_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1", "name": "One", "username": "one"}],
            "meta": {"result_count": 1, "next_token": "abc"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/2/users/2244994945/followers"))
        .and(query_param("pagination_token", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "2", "name": "Two", "username": "two"}],
            "meta": {"result_count": 1, "previous_token": "abc"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pages: Vec<ResponseEnvelope<User>> = client(&server)
        .get_follower_users("2244994945", RequestParams::new())
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    let usernames: Vec<_> = pages
        .iter()
        .flat_map(|p| p.data.iter().map(|u| u.username.as_str()))
        .collect();
    assert_eq!(usernames, ["one", "two"]);
    assert_eq!(
        pages[1].meta.as_ref().and_then(|m| m.previous_token.as_deref()),
        Some("abc")
    );
}

#[tokio::test]
async fn uploads_media_in_three_phases() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .and(body_string_contains("command=INIT"))
        .and(body_string_contains("total_bytes=6"))
        .and(body_string_contains("media_type=image%2Fpng"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "media_id": 710511363345354753u64,
            "media_id_string": "710511363345354753",
            "expires_after_secs": 86399
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .and(body_string_contains("APPEND"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/1.1/media/upload.json"))
        .and(body_string_contains("command=FINALIZE"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "media_id": 710511363345354753u64,
            "media_id_string": "710511363345354753",
            "size": 6
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .upload_media(b"ABCDEF".to_vec(), "image/png", "tweet_image")
        .await
        .expect("upload");
    assert_eq!(result.media_id, 710511363345354753);
}

#[tokio::test]
async fn unparseable_error_body_is_transport_class() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_me(RequestParams::new())
        .await
        .unwrap_err();
    assert!(err.is_transport(), "{err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn rate_limited_response_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "title": "Too Many Requests",
            "detail": "Too Many Requests",
            "type": "about:blank",
            "status": 429
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .search_recent("rust", RequestParams::new())
        .unwrap()
        .try_next()
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::RateLimit);
    assert_eq!(err.api_errors()[0].title.as_deref(), Some("Too Many Requests"));
}

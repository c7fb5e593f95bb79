mod support;

use serde_json::json;
use support::{ScriptedTransport, body_field, payload_len};
use twitter_v2::prelude::*;
use twitter_v2::types::ProcessingState;

const MEDIA_ID: u64 = 710511363345354753;

fn init_ok(transport: &ScriptedTransport) {
    transport.push_json(
        202,
        json!({"media_id": MEDIA_ID, "media_id_string": MEDIA_ID.to_string(), "expires_after_secs": 86400}),
    );
}

#[tokio::test]
async fn three_phase_upload_of_declared_size() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport.push_empty(204).push_empty(204).push_json(
        201,
        json!({
            "media_id": 710511363345354754u64,
            "media_id_string": "710511363345354754",
            "processing_info": {"state": "pending", "check_after_secs": 5}
        }),
    );
    let client = transport.client();
    let mut session = client.media_session();

    let id = session
        .initialize(1_500_000, "video/mp4", "tweet_video")
        .await
        .expect("init");
    assert_eq!(id, MEDIA_ID);
    assert_eq!(session.state(), UploadState::Initialized);

    session
        .append_segment(id, 0, vec![0u8; 1_000_000])
        .await
        .expect("segment 0");
    assert_eq!(session.state(), UploadState::Appending);
    session
        .append_segment(id, 1, vec![1u8; 500_000])
        .await
        .expect("segment 1");
    assert_eq!(session.bytes_sent(), 1_500_000);

    let final_id = session.finalize(id).await.expect("finalize");
    assert_eq!(final_id, 710511363345354754);
    assert_eq!(session.media_id(), Some(final_id));
    assert_eq!(session.state(), UploadState::Finalized);
    assert_eq!(
        session.processing_info().map(|p| p.state),
        Some(ProcessingState::Pending)
    );

    let calls = transport.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(body_field(&calls[0], "command"), Some("INIT"));
    assert_eq!(body_field(&calls[0], "total_bytes"), Some("1500000"));
    assert_eq!(body_field(&calls[0], "media_type"), Some("video/mp4"));
    assert_eq!(body_field(&calls[0], "media_category"), Some("tweet_video"));
    assert_eq!(body_field(&calls[1], "command"), Some("APPEND"));
    assert_eq!(body_field(&calls[1], "segment_index"), Some("0"));
    assert_eq!(body_field(&calls[2], "segment_index"), Some("1"));
    assert_eq!(body_field(&calls[2], "media_id"), Some(MEDIA_ID.to_string().as_str()));
    assert_eq!(payload_len(&calls[2]), 500_000);
    assert_eq!(body_field(&calls[3], "command"), Some("FINALIZE"));
    assert_eq!(
        calls[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer test-token")
    );
}

#[tokio::test]
async fn gap_in_segment_indices_is_a_protocol_violation() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport.push_empty(204).push_empty(204);
    let mut session = transport.client().media_session();

    let id = session
        .initialize(1_500_000, "video/mp4", "tweet_video")
        .await
        .unwrap();
    session
        .append_segment(id, 0, vec![0u8; 500_000])
        .await
        .unwrap();
    session
        .append_segment(id, 1, vec![0u8; 500_000])
        .await
        .unwrap();

    let err = session
        .append_segment(id, 3, vec![0u8; 500_000])
        .await
        .unwrap_err();
    assert!(err.is_protocol_violation(), "{err}");
    assert_eq!(session.state(), UploadState::Failed);
    // Rejected locally, nothing sent.
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn repeating_an_accepted_index_is_rejected() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport.push_empty(204);
    let mut session = transport.client().media_session();

    let id = session
        .initialize(10, "image/png", "tweet_image")
        .await
        .unwrap();
    session.append_segment(id, 0, vec![0u8; 5]).await.unwrap();
    let err = session
        .append_segment(id, 0, vec![9u8; 5])
        .await
        .unwrap_err();
    assert!(err.is_protocol_violation());
}

#[tokio::test]
async fn finalize_before_all_bytes_is_rejected_without_a_request() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport.push_empty(204);
    let mut session = transport.client().media_session();

    let id = session
        .initialize(100, "image/png", "tweet_image")
        .await
        .unwrap();
    session.append_segment(id, 0, vec![0u8; 60]).await.unwrap();

    let err = session.finalize(id).await.unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(session.state(), UploadState::Failed);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn finalize_straight_after_init_is_rejected() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    let mut session = transport.client().media_session();

    let id = session
        .initialize(100, "image/png", "tweet_image")
        .await
        .unwrap();
    assert!(
        session
            .finalize(id)
            .await
            .unwrap_err()
            .is_protocol_violation()
    );
}

#[tokio::test]
async fn segments_may_not_exceed_declared_size() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    let mut session = transport.client().media_session();

    let id = session
        .initialize(10, "image/png", "tweet_image")
        .await
        .unwrap();
    let err = session
        .append_segment(id, 0, vec![0u8; 11])
        .await
        .unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(session.bytes_sent(), 0);
}

#[tokio::test]
async fn terminal_sessions_reject_everything() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport
        .push_empty(204)
        .push_json(200, json!({"media_id": MEDIA_ID}));
    let mut session = transport.client().media_session();

    let id = session
        .initialize(4, "image/png", "tweet_image")
        .await
        .unwrap();
    session.append_segment(id, 0, vec![0u8; 4]).await.unwrap();
    session.finalize(id).await.unwrap();

    assert!(
        session
            .initialize(4, "image/png", "tweet_image")
            .await
            .unwrap_err()
            .is_protocol_violation()
    );
    assert!(
        session
            .append_segment(id, 1, vec![0u8; 1])
            .await
            .unwrap_err()
            .is_protocol_violation()
    );
    assert!(
        session
            .finalize(id)
            .await
            .unwrap_err()
            .is_protocol_violation()
    );
    assert_eq!(session.state(), UploadState::Finalized);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn failed_session_stays_failed() {
    let transport = ScriptedTransport::new();
    transport.push_json(
        400,
        json!({"errors": [{"code": 38, "message": "media_type parameter is missing."}]}),
    );
    let mut session = transport.client().media_session();

    let err = session
        .initialize(4, "image/png", "tweet_image")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.api_errors()[0].code, Some(38));
    assert_eq!(session.state(), UploadState::Failed);

    let err = session
        .initialize(4, "image/png", "tweet_image")
        .await
        .unwrap_err();
    assert!(err.is_protocol_violation());
    assert!(
        session
            .append_segment(1, 0, vec![0u8; 4])
            .await
            .unwrap_err()
            .is_protocol_violation()
    );
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn init_transport_failure_fails_the_session() {
    let transport = ScriptedTransport::new();
    transport.push_transport_error("connection refused");
    let mut session = transport.client().media_session();

    let err = session
        .initialize(4, "image/png", "tweet_image")
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(session.state(), UploadState::Failed);
}

#[tokio::test]
async fn zero_size_init_is_rejected() {
    let transport = ScriptedTransport::new();
    let mut session = transport.client().media_session();
    let err = session
        .initialize(0, "image/png", "tweet_image")
        .await
        .unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn append_transport_failure_can_be_retried_with_same_index() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport
        .push_transport_error("connection reset")
        .push_empty(204)
        .push_json(200, json!({"media_id": MEDIA_ID}));
    let mut session = transport.client().media_session();

    let id = session
        .initialize(8, "image/png", "tweet_image")
        .await
        .unwrap();
    let err = session
        .append_segment(id, 0, vec![7u8; 8])
        .await
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(session.state(), UploadState::Initialized);
    assert_eq!(session.next_segment_index(), 0);
    assert_eq!(session.bytes_sent(), 0);

    session
        .append_segment(id, 0, vec![7u8; 8])
        .await
        .expect("retry");
    session.finalize(id).await.expect("finalize");

    let calls = transport.calls();
    assert_eq!(body_field(&calls[1], "segment_index"), Some("0"));
    assert_eq!(body_field(&calls[2], "segment_index"), Some("0"));
}

#[tokio::test]
async fn append_api_error_fails_the_session() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport.push_json(400, json!({"errors": [{"code": 324, "message": "Invalid media id."}]}));
    let mut session = transport.client().media_session();

    let id = session
        .initialize(8, "image/png", "tweet_image")
        .await
        .unwrap();
    let err = session
        .append_segment(id, 0, vec![7u8; 8])
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(session.state(), UploadState::Failed);
}

#[tokio::test]
async fn append_with_wrong_media_id_is_rejected() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    let mut session = transport.client().media_session();

    session
        .initialize(8, "image/png", "tweet_image")
        .await
        .unwrap();
    let err = session
        .append_segment(1, 0, vec![7u8; 8])
        .await
        .unwrap_err();
    assert!(err.is_protocol_violation());
}

#[tokio::test]
async fn append_with_retry_policy_recovers_from_transport_failures() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport
        .push_transport_error("reset")
        .push_transport_error("reset")
        .push_empty(204);
    let mut session = transport.client().media_session();
    let policy = RetryPolicy::new()
        .with_max_attempts(3)
        .with_initial_delay(std::time::Duration::from_millis(1))
        .with_jitter(false);

    let id = session
        .initialize(3, "image/png", "tweet_image")
        .await
        .unwrap();
    session
        .append_segment_with_retry(id, 0, vec![1u8, 2, 3], &policy)
        .await
        .expect("third attempt succeeds");
    assert_eq!(session.bytes_sent(), 3);
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test]
async fn finalize_api_error_fails_the_session() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport.push_empty(204).push_json(
        400,
        json!({"errors": [{"code": 324, "message": "File size exceeds 5242880 bytes."}]}),
    );
    let mut session = transport.client().media_session();

    let id = session
        .initialize(6, "image/png", "tweet_image")
        .await
        .unwrap();
    session.append_segment(id, 0, vec![1u8; 6]).await.unwrap();

    let err = session.finalize(id).await.unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(session.state(), UploadState::Failed);
    assert!(session.processing_info().is_none());

    let err = session.finalize(id).await.unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(session.state(), UploadState::Failed);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn finalize_transport_failure_fails_the_session() {
    let transport = ScriptedTransport::new();
    init_ok(&transport);
    transport
        .push_empty(204)
        .push_transport_error("connection reset");
    let mut session = transport.client().media_session();

    let id = session
        .initialize(6, "image/png", "tweet_image")
        .await
        .unwrap();
    session.append_segment(id, 0, vec![1u8; 6]).await.unwrap();

    let err = session.finalize(id).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(session.state(), UploadState::Failed);

    assert!(
        session
            .finalize(id)
            .await
            .unwrap_err()
            .is_protocol_violation()
    );
    assert!(
        session
            .append_segment(id, 1, vec![1u8; 1])
            .await
            .unwrap_err()
            .is_protocol_violation()
    );
    assert_eq!(transport.call_count(), 3);
}

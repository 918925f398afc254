use serde_json::json;

use crate::integration::{init_tracing, start_server};
use crate::utils::{QUIET_PERIOD_MS, TestClient};

#[tokio::test]
async fn test_garbage_gets_no_reply_and_connection_survives() {
    init_tracing();

    let addr = start_server().await;
    let mut client = TestClient::connect(addr).await.expect("connects");

    for frame in [
        "not json",
        "[]",
        r#"{"room":"r1"}"#,
        r#"{"type":"join"}"#,
        r#"{"type":"offer","sdp":{}}"#,
        r#"{"type":"chat","text":"hello"}"#,
    ] {
        client.send_text(frame).await.unwrap();
    }

    assert!(
        client.try_recv_json(QUIET_PERIOD_MS).await.unwrap().is_none(),
        "malformed frames are not answered"
    );

    let id = client.join("r1").await.expect("join still works");
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_offer_to_unknown_peer_is_silently_dropped() {
    init_tracing();

    let addr = start_server().await;
    let mut client = TestClient::connect(addr).await.expect("connects");
    client.join("r1").await.unwrap();

    client
        .send_json(json!({
            "type": "offer",
            "target": "00000000-0000-4000-8000-000000000000",
            "sdp": { "type": "offer", "sdp": "v=0" },
        }))
        .await
        .unwrap();

    assert!(client.try_recv_json(QUIET_PERIOD_MS).await.unwrap().is_none());
}

use serde_json::json;

use crate::integration::{init_tracing, start_server};
use crate::utils::{QUIET_PERIOD_MS, TestClient};

#[tokio::test]
async fn test_two_clients_negotiate_through_relay() {
    init_tracing();

    let addr = start_server().await;

    let mut a = TestClient::connect(addr).await.expect("a connects");
    let a_id = a.join("r1").await.expect("a joins");
    assert!(
        a.try_recv_json(QUIET_PERIOD_MS).await.unwrap().is_none(),
        "first member gets no existing-peers"
    );

    let mut b = TestClient::connect(addr).await.expect("b connects");
    let b_id = b.join("r1").await.expect("b joins");

    let existing = b.expect("existing-peers").await.unwrap();
    assert_eq!(existing["peers"].as_array().unwrap().len(), 1);
    assert_eq!(existing["peers"][0]["id"], a_id);

    let joined = a.expect("peer-join").await.unwrap();
    assert_eq!(joined["id"], b_id);
    assert!(joined["color"].as_str().unwrap().starts_with('#'));

    a.send_json(json!({
        "type": "offer",
        "target": b_id,
        "sdp": { "type": "offer", "sdp": "v=0" },
    }))
    .await
    .unwrap();

    let offer = b.expect("offer").await.unwrap();
    assert_eq!(offer["source"], a_id);
    assert_eq!(offer["sdp"]["sdp"], "v=0");

    b.send_json(json!({
        "type": "answer",
        "target": a_id,
        "sdp": { "type": "answer", "sdp": "v=0" },
    }))
    .await
    .unwrap();

    let answer = a.expect("answer").await.unwrap();
    assert_eq!(answer["source"], b_id);

    a.close().await.unwrap();

    let leave = b.expect("peer-leave").await.unwrap();
    assert_eq!(leave["id"], a_id);
    assert!(
        b.try_recv_json(QUIET_PERIOD_MS).await.unwrap().is_none(),
        "exactly one peer-leave"
    );
}

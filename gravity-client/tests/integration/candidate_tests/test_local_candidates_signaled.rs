use gravity_client::NegotiationState;
use gravity_core::{PeerId, SignalMessage};

use crate::integration::{Harness, init_tracing};
use crate::utils::QUIET_PERIOD_MS;

#[tokio::test]
async fn test_local_candidate_sent_to_remote() {
    init_tracing();

    let harness = Harness::start();
    harness.welcome().await;

    let b = PeerId::new();
    harness.peer_join(b).await;
    assert!(harness.wait_for_state(b, NegotiationState::Offering).await);

    let spy = harness.factory.spy(b).await.unwrap();
    spy.local_candidate("candidate:local").await;

    assert!(harness.signaling.wait_for(b, "ice-candidate").await);
    let sent = harness.signaling.sent_to(b).await;
    let candidate = sent
        .iter()
        .find_map(|msg| match msg {
            SignalMessage::IceCandidate {
                source, candidate, ..
            } => {
                assert!(source.is_none());
                Some(candidate.candidate.clone())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(candidate, "candidate:local");
}

#[tokio::test]
async fn test_candidate_after_peer_leave_is_not_sent() {
    init_tracing();

    let harness = Harness::start();
    harness.welcome().await;

    let b = PeerId::new();
    harness.peer_join(b).await;
    let spy = harness.factory.wait_for_spy(b).await;
    assert!(harness.wait_for_state(b, NegotiationState::Offering).await);

    harness.peer_leave(b).await;
    assert!(harness.wait_for_participants(1).await);

    spy.local_candidate("candidate:late").await;
    tokio::time::sleep(std::time::Duration::from_millis(QUIET_PERIOD_MS)).await;

    assert_eq!(harness.signaling.count_of("ice-candidate").await, 0);
}

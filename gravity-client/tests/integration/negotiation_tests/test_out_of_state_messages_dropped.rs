use gravity_client::NegotiationState;
use gravity_core::{PeerId, SdpType};

use crate::integration::{Harness, init_tracing};
use crate::utils::{QUIET_PERIOD_MS, TransportCall};

async fn quiet() {
    tokio::time::sleep(std::time::Duration::from_millis(QUIET_PERIOD_MS)).await;
}

#[tokio::test]
async fn test_answer_without_offer_is_ignored() {
    init_tracing();

    let harness = Harness::start();
    harness.welcome().await;

    let a = PeerId::new();
    harness.existing_peers(&[a]).await;
    harness.answer_from(a).await;
    quiet().await;

    assert_eq!(harness.state_of(a).await, Some(NegotiationState::Idle));
    let spy = harness.factory.spy(a).await.unwrap();
    assert!(
        !spy
            .has_call(&TransportCall::SetRemoteDescription(SdpType::Answer))
            .await
    );
}

#[tokio::test]
async fn test_answer_from_unknown_peer_opens_nothing() {
    init_tracing();

    let harness = Harness::start();
    harness.welcome().await;

    harness.answer_from(PeerId::new()).await;
    quiet().await;

    assert_eq!(harness.factory.created_count().await, 0);
    assert_eq!(harness.handle.participant_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_second_offer_is_dropped() {
    init_tracing();

    let harness = Harness::start();
    harness.welcome().await;

    let a = PeerId::new();
    harness.existing_peers(&[a]).await;
    harness.offer_from(a).await;
    assert!(harness.wait_for_state(a, NegotiationState::Answering).await);

    harness.offer_from(a).await;
    quiet().await;

    let spy = harness.factory.spy(a).await.unwrap();
    assert_eq!(spy.count(&TransportCall::CreateAnswer).await, 1);
    assert_eq!(harness.signaling.count_of("answer").await, 1);
    assert_eq!(harness.state_of(a).await, Some(NegotiationState::Answering));
}

#[tokio::test]
async fn test_offer_to_offerer_is_dropped() {
    init_tracing();

    let harness = Harness::start();
    harness.welcome().await;

    let b = PeerId::new();
    harness.peer_join(b).await;
    assert!(harness.wait_for_state(b, NegotiationState::Offering).await);

    harness.offer_from(b).await;
    quiet().await;

    assert_eq!(harness.state_of(b).await, Some(NegotiationState::Offering));
    assert_eq!(harness.signaling.count_of("answer").await, 0);
}

use gravity_core::{RoomId, SignalMessage};
use gravity_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, join};

#[tokio::test]
async fn test_first_join_wins() {
    init_tracing();

    let (cmd_tx, signaling) = create_test_relay();

    let a = join(&cmd_tx, "r1").await;
    cmd_tx
        .send(RelayCommand::Join {
            peer_id: a,
            room: RoomId::new("r2").unwrap(),
        })
        .await
        .unwrap();

    let b = join(&cmd_tx, "r2").await;
    let c = join(&cmd_tx, "r1").await;

    // a: welcome + peer-join(c), b: welcome, c: welcome + snapshot
    assert!(signaling.wait_for_deliveries(5, 5000).await);

    let b_kinds: Vec<&str> = signaling
        .signals_for(&b)
        .await
        .iter()
        .map(SignalMessage::kind)
        .collect();
    assert_eq!(b_kinds, vec!["welcome"], "a never moved into r2");

    let a_signals = signaling.signals_for(&a).await;
    assert_eq!(
        a_signals
            .iter()
            .filter(|s| matches!(s, SignalMessage::Welcome { .. }))
            .count(),
        1
    );
    assert!(a_signals.contains(&SignalMessage::PeerJoin {
        id: c,
        color: gravity_core::Color::for_peer(&c)
    }));
}

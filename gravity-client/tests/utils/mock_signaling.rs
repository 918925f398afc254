use crate::utils::{WAIT_TIMEOUT_MS, poll_until};
use async_trait::async_trait;
use gravity_client::signaling::SignalingOutput;
use gravity_core::{PeerId, SignalMessage};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Records every message the orchestrator sends towards the relay.
#[derive(Clone, Default)]
pub struct MockSignaling {
    sent: Arc<Mutex<Vec<SignalMessage>>>,
}

impl MockSignaling {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SignalMessage> {
        self.sent.lock().await.clone()
    }

    /// Messages directed at `peer_id`, in send order.
    pub async fn sent_to(&self, peer_id: PeerId) -> Vec<SignalMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|msg| target_of(msg) == Some(peer_id))
            .cloned()
            .collect()
    }

    pub async fn kinds_to(&self, peer_id: PeerId) -> Vec<&'static str> {
        self.sent_to(peer_id)
            .await
            .iter()
            .map(SignalMessage::kind)
            .collect()
    }

    pub async fn count_of(&self, kind: &str) -> usize {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|msg| msg.kind() == kind)
            .count()
    }

    /// Wait until a message of `kind` has been sent to `peer_id`.
    pub async fn wait_for(&self, peer_id: PeerId, kind: &'static str) -> bool {
        let signaling = self;
        poll_until(WAIT_TIMEOUT_MS, || async move {
            signaling.kinds_to(peer_id).await.contains(&kind)
        })
        .await
    }
}

pub fn target_of(msg: &SignalMessage) -> Option<PeerId> {
    match msg {
        SignalMessage::Offer { target, .. }
        | SignalMessage::Answer { target, .. }
        | SignalMessage::IceCandidate { target, .. } => *target,
        _ => None,
    }
}

#[async_trait]
impl SignalingOutput for MockSignaling {
    async fn send(&self, message: SignalMessage) {
        tracing::debug!("[MockSignaling] {}", message.kind());
        self.sent.lock().await.push(message);
    }
}

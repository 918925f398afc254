use async_trait::async_trait;
use gravity_core::SignalMessage;
use tokio::sync::mpsc;
use tracing::debug;

/// Outbound half of the relay connection as the orchestrator sees it.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, message: SignalMessage);
}

/// Queues messages for the WebSocket writer task.
pub struct ChannelSignaling {
    tx: mpsc::UnboundedSender<SignalMessage>,
}

impl ChannelSignaling {
    pub fn new(tx: mpsc::UnboundedSender<SignalMessage>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl SignalingOutput for ChannelSignaling {
    async fn send(&self, message: SignalMessage) {
        if let Err(e) = self.tx.send(message) {
            debug!("Relay writer gone, dropping {}", e.0.kind());
        }
    }
}

use crate::signaling::Outbound;
use gravity_core::PeerId;
use async_trait::async_trait;

/// Implemented by whatever owns the client connections (the WebSocket
/// service) so the relay can write to a client by id.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Write one frame to a client. Unknown ids are dropped silently.
    async fn deliver(&self, peer_id: PeerId, message: Outbound);
}

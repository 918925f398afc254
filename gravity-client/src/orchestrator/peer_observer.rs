use crate::media::RemoteTrack;
use crate::session::NegotiationState;
use async_trait::async_trait;
use gravity_core::{PeerId, PeerInfo};

/// Presentation hooks. Called from the orchestrator task, so
/// implementations should hand work off rather than block.
#[async_trait]
pub trait PeerObserver: Send + Sync + 'static {
    /// A session was opened. Show a tile for `peer` in its color.
    async fn on_peer_added(&self, peer: PeerInfo);

    /// The session is gone. Remove the peer's tile.
    async fn on_peer_removed(&self, peer_id: PeerId);

    async fn on_remote_track(&self, peer_id: PeerId, track: RemoteTrack);

    async fn on_welcome(&self, _local: PeerInfo) {}

    async fn on_peer_state(&self, _peer_id: PeerId, _state: NegotiationState) {}

    async fn on_media_error(&self, _reason: String) {}
}

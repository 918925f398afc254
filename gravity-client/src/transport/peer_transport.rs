use crate::media::{LocalMedia, LocalTrack};
use crate::transport::{TransportConfig, TransportEvent};
use anyhow::Result;
use async_trait::async_trait;
use gravity_core::{IceCandidate, PeerId, SessionDescription};
use tokio::sync::mpsc;

/// The per-peer media transport the orchestrator drives.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Adds a sender for every track in `media` that has none yet and
    /// swaps the source of senders that already exist.
    async fn attach_tracks(&self, media: &LocalMedia) -> Result<()>;

    /// Swaps the source of the sender of `track`'s kind without renegotiating.
    async fn replace_track(&self, track: &LocalTrack) -> Result<()>;

    /// Creates an offer and applies it as the local description.
    async fn create_offer(&self) -> Result<SessionDescription>;

    /// Creates an answer and applies it as the local description.
    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_remote_description(&self, description: SessionDescription) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

#[async_trait]
pub trait TransportFactory: Send + Sync {
    /// Creates the transport for `peer_id` using the client's `config`.
    /// Its events go to `events`.
    async fn create(
        &self,
        peer_id: PeerId,
        config: &TransportConfig,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>>;
}

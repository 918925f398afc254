use async_trait::async_trait;
use colored::*;
use gravity_client::{NegotiationState, PeerObserver, RemoteTrack};
use gravity_core::{PeerId, PeerInfo};
use tracing::{info, warn};

/// Prints what a headless participant would otherwise render.
pub struct LoggingObserver;

#[async_trait]
impl PeerObserver for LoggingObserver {
    async fn on_welcome(&self, local: PeerInfo) {
        println!(
            "{} {} ({})",
            "Joined as".green().bold(),
            local.id,
            local.color
        );
    }

    async fn on_peer_added(&self, peer: PeerInfo) {
        println!("{} {} ({})", "+ peer".cyan(), peer.id, peer.color);
    }

    async fn on_peer_removed(&self, peer_id: PeerId) {
        println!("{} {}", "- peer".yellow(), peer_id);
    }

    async fn on_remote_track(&self, peer_id: PeerId, track: RemoteTrack) {
        info!(
            "Receiving {:?} track {} from {}",
            track.kind, track.id, peer_id
        );
    }

    async fn on_peer_state(&self, peer_id: PeerId, state: NegotiationState) {
        match state {
            NegotiationState::Connected => {
                println!("{} {}", "Connected to".green(), peer_id)
            }
            NegotiationState::Failed => {
                println!("{} {}", "Connection failed with".red().bold(), peer_id)
            }
            _ => info!("{} is {:?}", peer_id, state),
        }
    }

    async fn on_media_error(&self, reason: String) {
        warn!("Media error: {}", reason);
    }
}

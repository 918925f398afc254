use crate::media::RemoteTrack;
use gravity_core::{IceCandidate, PeerId};

/// Events a transport reports back to the orchestrator, tagged with the
/// remote peer the transport belongs to.
#[derive(Debug)]
pub enum TransportEvent {
    /// A local ICE candidate that must be signaled to the remote peer.
    CandidateGenerated(PeerId, IceCandidate),

    /// Media path established.
    Connected(PeerId),

    /// The remote peer started sending a track.
    TrackAvailable(PeerId, RemoteTrack),

    /// Connectivity failed. Fatal for this session only.
    Failed(PeerId),

    Closed(PeerId),
}

impl TransportEvent {
    pub fn peer_id(&self) -> PeerId {
        match self {
            Self::CandidateGenerated(peer_id, _)
            | Self::Connected(peer_id)
            | Self::TrackAvailable(peer_id, _)
            | Self::Failed(peer_id)
            | Self::Closed(peer_id) => *peer_id,
        }
    }
}

use gravity_core::{Color, PeerId, PeerInfo, RoomId};

/// Relay-side record of one connected client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub peer_id: PeerId,
    pub color: Color,
    /// Bound by the first `join` and never changed afterwards.
    pub room: Option<RoomId>,
}

impl Registration {
    pub fn new(peer_id: PeerId) -> Self {
        Self {
            peer_id,
            color: Color::for_peer(&peer_id),
            room: None,
        }
    }

    pub fn info(&self) -> PeerInfo {
        PeerInfo::new(self.peer_id, self.color.clone())
    }

    pub fn has_joined(&self) -> bool {
        self.room.is_some()
    }
}

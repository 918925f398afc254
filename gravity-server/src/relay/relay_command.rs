use gravity_core::{PeerId, RoomId};
use serde_json::{Map, Value};

/// Commands the relay actor receives from connection handlers.
#[derive(Debug)]
pub enum RelayCommand {
    /// A connection was accepted and got its identity.
    Register { peer_id: PeerId },

    /// The client asked to be placed into a room.
    Join { peer_id: PeerId, room: RoomId },

    /// Directed offer/answer/candidate to deliver to `target`.
    Forward {
        source: PeerId,
        target: PeerId,
        envelope: Map<String, Value>,
    },

    /// The connection closed or errored.
    Unregister { peer_id: PeerId },
}

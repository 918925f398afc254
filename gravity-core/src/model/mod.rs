mod color;
mod peer;
mod room;
mod signaling;

pub use color::Color;
pub use peer::{PeerId, PeerInfo};
pub use room::RoomId;
pub use signaling::{IceCandidate, IceServerConfig, SdpType, SessionDescription, SignalMessage};

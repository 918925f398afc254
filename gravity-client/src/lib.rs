mod config;
mod error;
pub mod media;
pub mod orchestrator;
pub mod session;
pub mod signaling;
pub mod transport;

pub use config::ClientConfig;
pub use error::ClientError;
pub use media::{LocalMedia, LocalTrack, RemoteTrack, TrackKind};
pub use orchestrator::{
    MAX_EARLY_CANDIDATES, OrchestratorHandle, OrchestratorSnapshot, PeerObserver,
    PeerOrchestrator,
};
pub use session::{NegotiationEvent, NegotiationState, Role, SessionSnapshot};
pub use signaling::{Client, connect};
pub use transport::{
    PeerTransport, RtcTransport, RtcTransportFactory, TransportConfig, TransportEvent,
    TransportFactory,
};

use crate::transport::TransportConfig;
use gravity_core::RoomId;

/// Everything a client needs to take part in a call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket URL of the relay, e.g. `ws://localhost:3000/ws`.
    pub relay_url: String,
    pub room: RoomId,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(relay_url: impl Into<String>, room: RoomId) -> Self {
        Self {
            relay_url: relay_url.into(),
            room,
            transport: TransportConfig::default(),
        }
    }

    /// Joins the room derived from a context string such as a page URL.
    pub fn for_context(relay_url: impl Into<String>, context: &str) -> Self {
        Self::new(relay_url, RoomId::derive(context))
    }
}

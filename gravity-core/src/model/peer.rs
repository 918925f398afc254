use crate::error::ProtocolError;
use crate::model::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque per-connection identity assigned by the relay.
///
/// A fresh id is generated for every accepted connection and is never
/// reused, so a reconnecting client always shows up as a new peer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct PeerId(pub Uuid);

impl PeerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// First eight characters, used for log lines and default labels.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_owned()
    }
}

impl Default for PeerId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for PeerId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ProtocolError::InvalidPeerId(s.to_owned()))
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A room member as announced by the relay.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    pub id: PeerId,
    pub color: Color,
}

impl PeerInfo {
    pub fn new(id: PeerId, color: Color) -> Self {
        Self { id, color }
    }
}

use crate::model::PeerId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CSS hex colour (`#rrggbb`) shown next to a participant.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    const FALLBACK: &'static str = "#cccccc";

    /// Derives a colour from the random bytes of a peer id.
    pub fn for_peer(peer_id: &PeerId) -> Self {
        let b = peer_id.as_bytes();
        Self(format!("#{:02x}{:02x}{:02x}", b[0], b[1], b[2]))
    }

    /// Used for sessions created before the relay announced the peer.
    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::fallback()
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

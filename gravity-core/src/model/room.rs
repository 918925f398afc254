use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Opaque partition key grouping the clients that should connect to each
/// other. The relay only ever compares room ids for equality.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ProtocolError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ProtocolError::EmptyRoom);
        }
        Ok(Self(raw))
    }

    /// Derives a room token from the joining context (usually the page URL).
    ///
    /// The token is the lowercase hex SHA-256 of the context, so equal
    /// contexts land in the same room and the token only contains
    /// `[0-9a-f]`.
    pub fn derive(context: &str) -> Self {
        let digest = Sha256::digest(context.as_bytes());
        Self(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(room: RoomId) -> Self {
        room.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

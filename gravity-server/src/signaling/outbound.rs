use gravity_core::{ProtocolError, SignalMessage};
use serde_json::{Map, Value};

/// A frame the relay writes to one client.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Membership notification produced by the relay itself.
    Signal(SignalMessage),
    /// Directed message from another client, forwarded as received plus `source`.
    Relayed(Map<String, Value>),
}

impl Outbound {
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        match self {
            Self::Signal(msg) => msg.to_json(),
            Self::Relayed(envelope) => Ok(serde_json::to_string(envelope)?),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Signal(msg) => msg.kind(),
            Self::Relayed(envelope) => envelope
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown"),
        }
    }
}

impl From<SignalMessage> for Outbound {
    fn from(msg: SignalMessage) -> Self {
        Self::Signal(msg)
    }
}

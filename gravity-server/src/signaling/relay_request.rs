use gravity_core::{PeerId, ProtocolError, RoomId, SignalMessage};
use serde::Deserialize;
use serde_json::{Map, Value};

/// What a client asked the relay to do.
///
/// Directed messages keep their whole JSON object: the relay reads `type`
/// and `target` and never looks at the negotiation payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayRequest {
    Join {
        room: RoomId,
    },
    Forward {
        target: PeerId,
        envelope: Map<String, Value>,
    },
}

#[derive(Deserialize)]
struct JoinFields {
    room: RoomId,
}

impl RelayRequest {
    /// Decodes one text frame. `Ok(None)` means a well-formed message of a
    /// type the relay does not handle.
    pub fn parse(text: &str) -> Result<Option<Self>, ProtocolError> {
        let Value::Object(envelope) = serde_json::from_str::<Value>(text)? else {
            return Err(ProtocolError::NotAnObject);
        };

        let kind = envelope
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingType)?
            .to_owned();

        if kind == "join" {
            let JoinFields { room } = serde_json::from_value(Value::Object(envelope))?;
            return Ok(Some(Self::Join { room }));
        }

        if !SignalMessage::DIRECTED.contains(&kind.as_str()) {
            return Ok(None);
        }

        let target = envelope
            .get("target")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::MissingTarget(kind.clone()))?
            .parse::<PeerId>()?;

        Ok(Some(Self::Forward { target, envelope }))
    }
}

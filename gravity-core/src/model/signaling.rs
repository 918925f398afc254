use crate::error::ProtocolError;
use crate::model::{Color, PeerId, PeerInfo, RoomId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
    Pranswer,
    Rollback,
}

/// Session description in the shape browsers serialize `RTCSessionDescription`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            kind: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

/// Network path descriptor in the shape of `RTCIceCandidateInit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default)]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

/// Every frame exchanged over the signaling channel.
///
/// `target` is set by the sender of a directed message and `source` is
/// stamped by the relay when it forwards it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    Join {
        room: RoomId,
    },
    Welcome {
        id: PeerId,
        color: Color,
    },
    ExistingPeers {
        peers: Vec<PeerInfo>,
    },
    PeerJoin {
        id: PeerId,
        color: Color,
    },
    PeerLeave {
        id: PeerId,
    },
    Offer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<PeerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<PeerId>,
        sdp: SessionDescription,
    },
    Answer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<PeerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<PeerId>,
        sdp: SessionDescription,
    },
    IceCandidate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<PeerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<PeerId>,
        candidate: IceCandidate,
    },
}

impl SignalMessage {
    /// Message types the relay forwards by `target` without looking inside.
    pub const DIRECTED: [&'static str; 3] = ["offer", "answer", "ice-candidate"];

    pub fn offer_to(target: PeerId, sdp: SessionDescription) -> Self {
        Self::Offer {
            target: Some(target),
            source: None,
            sdp,
        }
    }

    pub fn answer_to(target: PeerId, sdp: SessionDescription) -> Self {
        Self::Answer {
            target: Some(target),
            source: None,
            sdp,
        }
    }

    pub fn candidate_to(target: PeerId, candidate: IceCandidate) -> Self {
        Self::IceCandidate {
            target: Some(target),
            source: None,
            candidate,
        }
    }

    /// Wire name of the message type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Welcome { .. } => "welcome",
            Self::ExistingPeers { .. } => "existing-peers",
            Self::PeerJoin { .. } => "peer-join",
            Self::PeerLeave { .. } => "peer-leave",
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }
}

mod local_media;
mod remote_track;

pub use local_media::*;
pub use remote_track::*;

use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

impl TrackKind {
    pub const ALL: [TrackKind; 2] = [TrackKind::Audio, TrackKind::Video];

    pub fn codec_type(self) -> RTPCodecType {
        match self {
            Self::Audio => RTPCodecType::Audio,
            Self::Video => RTPCodecType::Video,
        }
    }

    pub fn from_codec_type(codec: RTPCodecType) -> Option<Self> {
        match codec {
            RTPCodecType::Audio => Some(Self::Audio),
            RTPCodecType::Video => Some(Self::Video),
            _ => None,
        }
    }
}

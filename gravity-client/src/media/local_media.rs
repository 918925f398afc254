use crate::media::TrackKind;
use std::fmt;
use std::sync::Arc;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// A locally captured track. Clones share one underlying sample track, so
/// every session sending this kind carries the same media.
#[derive(Clone)]
pub struct LocalTrack {
    kind: TrackKind,
    id: String,
    track: Arc<TrackLocalStaticSample>,
}

impl LocalTrack {
    /// Opus microphone track.
    pub fn audio(id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let codec = RTCRtpCodecCapability {
            mime_type: MIME_TYPE_OPUS.to_owned(),
            clock_rate: 48000,
            channels: 2,
            ..Default::default()
        };
        Self::new(TrackKind::Audio, codec, id.into(), stream_id.into())
    }

    /// VP8 camera track.
    pub fn video(id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let codec = RTCRtpCodecCapability {
            mime_type: MIME_TYPE_VP8.to_owned(),
            clock_rate: 90000,
            ..Default::default()
        };
        Self::new(TrackKind::Video, codec, id.into(), stream_id.into())
    }

    fn new(kind: TrackKind, codec: RTCRtpCodecCapability, id: String, stream_id: String) -> Self {
        let track = Arc::new(TrackLocalStaticSample::new(codec, id.clone(), stream_id));
        Self { kind, id, track }
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn as_track_local(&self) -> Arc<dyn TrackLocal + Send + Sync> {
        self.track.clone()
    }
}

impl fmt::Debug for LocalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTrack")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

/// The local media bundle published to every session, at most one track per kind.
///
/// An empty bundle is valid: sessions then only receive.
#[derive(Debug, Clone, Default)]
pub struct LocalMedia {
    tracks: Vec<LocalTrack>,
}

impl LocalMedia {
    pub fn new(tracks: impl IntoIterator<Item = LocalTrack>) -> Self {
        let mut media = Self::default();
        for track in tracks {
            media.replace(track);
        }
        media
    }

    pub fn tracks(&self) -> &[LocalTrack] {
        &self.tracks
    }

    pub fn track(&self, kind: TrackKind) -> Option<&LocalTrack> {
        self.tracks.iter().find(|t| t.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Swaps in `track` for its kind and returns the track it displaced.
    pub fn replace(&mut self, track: LocalTrack) -> Option<LocalTrack> {
        match self.tracks.iter_mut().find(|t| t.kind == track.kind) {
            Some(slot) => Some(std::mem::replace(slot, track)),
            None => {
                self.tracks.push(track);
                None
            }
        }
    }
}

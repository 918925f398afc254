use crate::media::TrackKind;
use std::fmt;
use std::sync::Arc;
use webrtc::track::track_remote::TrackRemote;

/// A track received from a remote peer, handed to the presentation layer.
#[derive(Clone)]
pub struct RemoteTrack {
    pub kind: TrackKind,
    pub id: String,
    pub stream_id: String,
    handle: Option<Arc<TrackRemote>>,
}

impl RemoteTrack {
    pub fn new(kind: TrackKind, id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            stream_id: stream_id.into(),
            handle: None,
        }
    }

    pub(crate) fn from_rtc(track: Arc<TrackRemote>) -> Option<Self> {
        let kind = TrackKind::from_codec_type(track.kind())?;
        Some(Self {
            kind,
            id: track.id(),
            stream_id: track.stream_id(),
            handle: Some(track),
        })
    }

    /// RTP reader for the track, present when it came from a real connection.
    pub fn handle(&self) -> Option<&Arc<TrackRemote>> {
        self.handle.as_ref()
    }
}

impl fmt::Debug for RemoteTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteTrack")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("stream_id", &self.stream_id)
            .finish()
    }
}

use crate::utils::{WAIT_TIMEOUT_MS, poll_until};
use async_trait::async_trait;
use gravity_client::{NegotiationState, PeerObserver, RemoteTrack, TrackKind};
use gravity_core::{PeerId, PeerInfo};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    Welcome(PeerId),
    PeerAdded(PeerInfo),
    PeerRemoved(PeerId),
    RemoteTrack(PeerId, TrackKind),
    PeerState(PeerId, NegotiationState),
    MediaError(String),
}

/// Observer that keeps every callback for later assertions.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObserverEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().await.clone()
    }

    pub async fn count(&self, event: &ObserverEvent) -> usize {
        self.events.lock().await.iter().filter(|e| *e == event).count()
    }

    /// States `peer_id` went through, in order.
    pub async fn states_of(&self, peer_id: PeerId) -> Vec<NegotiationState> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::PeerState(id, state) if *id == peer_id => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub async fn wait_for(&self, event: ObserverEvent) -> bool {
        let observer = self;
        poll_until(WAIT_TIMEOUT_MS, || {
            let event = event.clone();
            async move { observer.count(&event).await > 0 }
        })
        .await
    }

    async fn push(&self, event: ObserverEvent) {
        self.events.lock().await.push(event);
    }
}

#[async_trait]
impl PeerObserver for RecordingObserver {
    async fn on_peer_added(&self, peer: PeerInfo) {
        self.push(ObserverEvent::PeerAdded(peer)).await;
    }

    async fn on_peer_removed(&self, peer_id: PeerId) {
        self.push(ObserverEvent::PeerRemoved(peer_id)).await;
    }

    async fn on_remote_track(&self, peer_id: PeerId, track: RemoteTrack) {
        self.push(ObserverEvent::RemoteTrack(peer_id, track.kind)).await;
    }

    async fn on_welcome(&self, local: PeerInfo) {
        self.push(ObserverEvent::Welcome(local.id)).await;
    }

    async fn on_peer_state(&self, peer_id: PeerId, state: NegotiationState) {
        self.push(ObserverEvent::PeerState(peer_id, state)).await;
    }

    async fn on_media_error(&self, reason: String) {
        self.push(ObserverEvent::MediaError(reason)).await;
    }
}

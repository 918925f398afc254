use crate::media::LocalMedia;
use crate::orchestrator::{OrchestratorCommand, OrchestratorHandle, PeerObserver};
use crate::session::{NegotiationEvent, NegotiationState, PeerSession, Role, SessionSnapshot};
use crate::signaling::SignalingOutput;
use crate::transport::{TransportConfig, TransportEvent, TransportFactory};
use gravity_core::{Color, IceCandidate, PeerId, PeerInfo, SessionDescription, SignalMessage};
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Candidates held per peer that has no session yet. Later ones are dropped.
pub const MAX_EARLY_CANDIDATES: usize = 32;

/// Point-in-time view of the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorSnapshot {
    /// Identity assigned by the relay, once `welcome` has arrived.
    pub local: Option<PeerInfo>,
    /// Open sessions ordered by remote id.
    pub sessions: Vec<SessionSnapshot>,
}

impl OrchestratorSnapshot {
    pub fn participant_count(&self) -> usize {
        self.sessions.len() + 1
    }

    pub fn session(&self, peer_id: PeerId) -> Option<&SessionSnapshot> {
        self.sessions.iter().find(|s| s.remote == peer_id)
    }
}

/// Client-side actor that keeps one [`PeerSession`] per remote participant.
///
/// Everything that touches sessions (relay messages, transport events and
/// local commands) is handled on this one task, so no locking is needed and
/// events for a peer are applied in the order they arrive.
pub struct PeerOrchestrator {
    local: Option<PeerInfo>,
    sessions: HashMap<PeerId, PeerSession>,

    /// Candidates from peers we have no session for yet.
    early_candidates: HashMap<PeerId, Vec<IceCandidate>>,

    media: LocalMedia,
    factory: Arc<dyn TransportFactory>,
    transport_config: TransportConfig,
    observer: Arc<dyn PeerObserver>,
    signaling: Arc<dyn SignalingOutput>,

    signal_rx: mpsc::Receiver<SignalMessage>,
    command_rx: mpsc::Receiver<OrchestratorCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
}

impl PeerOrchestrator {
    pub fn new(
        signal_rx: mpsc::Receiver<SignalMessage>,
        signaling: Arc<dyn SignalingOutput>,
        factory: Arc<dyn TransportFactory>,
        transport_config: TransportConfig,
        observer: Arc<dyn PeerObserver>,
        media: LocalMedia,
    ) -> (Self, OrchestratorHandle) {
        let (transport_tx, transport_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(64);

        let orchestrator = Self {
            local: None,
            sessions: HashMap::new(),
            early_candidates: HashMap::new(),
            media,
            factory,
            transport_config,
            observer,
            signaling,
            signal_rx,
            command_rx,
            transport_rx,
            transport_tx,
        };

        (orchestrator, OrchestratorHandle::new(command_tx))
    }

    /// Runs until hangup, or until both the relay and every handle are gone.
    /// Losing the relay alone leaves established sessions running.
    pub async fn run(mut self) {
        info!("Orchestrator event loop started");

        let mut signals_open = true;
        let mut commands_open = true;

        while signals_open || commands_open {
            tokio::select! {
                msg = self.signal_rx.recv(), if signals_open => match msg {
                    Some(msg) => self.handle_signal(msg).await,
                    None => {
                        info!("Relay channel closed. Keeping existing sessions.");
                        signals_open = false;
                    }
                },

                cmd = self.command_rx.recv(), if commands_open => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd).await.is_break() {
                            break;
                        }
                    }
                    None => commands_open = false,
                },

                Some(evt) = self.transport_rx.recv() => self.handle_transport_event(evt).await,
            }
        }

        self.close_all().await;
        info!("Orchestrator event loop finished");
    }

    async fn handle_signal(&mut self, msg: SignalMessage) {
        match msg {
            SignalMessage::Welcome { id, color } => self.on_welcome(PeerInfo::new(id, color)).await,

            SignalMessage::ExistingPeers { peers } => {
                for peer in peers {
                    self.on_existing_peer(peer).await;
                }
            }

            SignalMessage::PeerJoin { id, color } => self.on_peer_join(PeerInfo::new(id, color)).await,

            SignalMessage::PeerLeave { id } => self.on_peer_leave(id).await,

            SignalMessage::Offer {
                source: Some(source),
                sdp,
                ..
            } => self.on_offer(source, sdp).await,

            SignalMessage::Answer {
                source: Some(source),
                sdp,
                ..
            } => self.on_answer(source, sdp).await,

            SignalMessage::IceCandidate {
                source: Some(source),
                candidate,
                ..
            } => self.on_remote_candidate(source, candidate).await,

            other => debug!("Ignoring {} message", other.kind()),
        }
    }

    async fn on_welcome(&mut self, local: PeerInfo) {
        info!("Joined as {} with color {}", local.id, local.color);
        self.local = Some(local.clone());
        self.observer.on_welcome(local).await;

        for session in self.sessions.values() {
            if let Err(e) = session.transport().attach_tracks(&self.media).await {
                warn!("Failed to republish tracks to {}: {:?}", session.remote(), e);
            }
        }
    }

    /// Peers already in the room will offer to us, so their sessions wait in `Idle`.
    async fn on_existing_peer(&mut self, peer: PeerInfo) {
        if self.is_known(peer.id) {
            debug!("Already tracking {}", peer.id);
            return;
        }
        self.open_session(peer, Role::Answerer).await;
    }

    async fn on_peer_join(&mut self, peer: PeerInfo) {
        if self.is_known(peer.id) {
            debug!("Already tracking {}", peer.id);
            return;
        }
        let remote = peer.id;
        if self.open_session(peer, Role::Offerer).await {
            self.send_offer(remote).await;
        }
    }

    async fn on_peer_leave(&mut self, peer_id: PeerId) {
        self.early_candidates.remove(&peer_id);

        let Some(session) = self.sessions.remove(&peer_id) else {
            debug!("peer-leave for unknown peer {}", peer_id);
            return;
        };

        info!("Peer {} left in state {:?}", peer_id, session.state());
        if let Err(e) = session.transport().close().await {
            warn!("Failed to close transport for {}: {:?}", peer_id, e);
        }
        self.observer.on_peer_removed(peer_id).await;
    }

    async fn on_offer(&mut self, source: PeerId, sdp: SessionDescription) {
        if self.is_self(source) {
            return;
        }

        if !self.sessions.contains_key(&source) {
            debug!("Offer from unannounced peer {}", source);
            let peer = PeerInfo::new(source, Color::fallback());
            if !self.open_session(peer, Role::Answerer).await {
                return;
            }
        }

        let Some(session) = self.sessions.get(&source) else {
            return;
        };
        if session.state() != NegotiationState::Idle {
            warn!("Dropping offer from {} in state {:?}", source, session.state());
            return;
        }

        if let Err(e) = session.transport().set_remote_description(sdp).await {
            error!("Failed to apply offer from {}: {:?}", source, e);
            self.fail(source).await;
            return;
        }
        self.advance(source, NegotiationEvent::OfferReceived).await;
        self.flush_candidates(source).await;

        let Some(session) = self.sessions.get(&source) else {
            return;
        };
        let answer = match session.transport().create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Failed to create answer for {}: {:?}", source, e);
                self.fail(source).await;
                return;
            }
        };

        self.advance(source, NegotiationEvent::AnswerSent).await;
        self.signaling
            .send(SignalMessage::answer_to(source, answer))
            .await;
    }

    async fn on_answer(&mut self, source: PeerId, sdp: SessionDescription) {
        let Some(session) = self.sessions.get(&source) else {
            debug!("Answer from unknown peer {}", source);
            return;
        };
        if session.state() != NegotiationState::Offering {
            warn!("Dropping answer from {} in state {:?}", source, session.state());
            return;
        }

        if let Err(e) = session.transport().set_remote_description(sdp).await {
            error!("Failed to apply answer from {}: {:?}", source, e);
            self.fail(source).await;
            return;
        }
        self.advance(source, NegotiationEvent::AnswerReceived).await;
        self.flush_candidates(source).await;
    }

    async fn on_remote_candidate(&mut self, source: PeerId, candidate: IceCandidate) {
        let Some(session) = self.sessions.get_mut(&source) else {
            let held = self.early_candidates.entry(source).or_default();
            if held.len() >= MAX_EARLY_CANDIDATES {
                warn!("Dropping candidate from unknown peer {}: too many held", source);
                return;
            }
            debug!("Holding candidate from unknown peer {}", source);
            held.push(candidate);
            return;
        };

        let state = session.state();
        if state.buffers_candidates() {
            session.queue_candidate(candidate);
            return;
        }
        if !state.has_remote_description() {
            debug!("Dropping candidate from {} in state {:?}", source, state);
            return;
        }

        if let Err(e) = session.transport().add_ice_candidate(candidate).await {
            warn!("Failed to add candidate from {}: {:?}", source, e);
        }
    }

    async fn handle_transport_event(&mut self, evt: TransportEvent) {
        let peer_id = evt.peer_id();
        if !self.sessions.contains_key(&peer_id) {
            debug!("Transport event for closed session {}", peer_id);
            return;
        }

        match evt {
            TransportEvent::CandidateGenerated(peer_id, candidate) => {
                self.signaling
                    .send(SignalMessage::candidate_to(peer_id, candidate))
                    .await;
            }

            TransportEvent::Connected(peer_id) => {
                if self.advance(peer_id, NegotiationEvent::TransportConnected).await {
                    info!("Media connected with {}", peer_id);
                }
            }

            TransportEvent::TrackAvailable(peer_id, track) => {
                self.observer.on_remote_track(peer_id, track).await;
            }

            TransportEvent::Failed(peer_id) => self.fail(peer_id).await,

            TransportEvent::Closed(peer_id) => {
                self.advance(peer_id, NegotiationEvent::TransportClosed).await;
            }
        }
    }

    async fn handle_command(&mut self, cmd: OrchestratorCommand) -> ControlFlow<()> {
        match cmd {
            OrchestratorCommand::ReplaceTrack(track) => {
                info!("Replacing local {:?} track with {}", track.kind(), track.id());
                for session in self.sessions.values() {
                    if let Err(e) = session.transport().replace_track(&track).await {
                        warn!("Failed to replace track towards {}: {:?}", session.remote(), e);
                    }
                }
                self.media.replace(track);
            }

            OrchestratorCommand::MediaError(reason) => {
                warn!("Local media unavailable: {}", reason);
                self.observer.on_media_error(reason).await;
            }

            OrchestratorCommand::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }

            OrchestratorCommand::Hangup => {
                info!("Hangup requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Creates the transport, attaches local media and registers the session.
    /// Returns false if no transport could be created.
    async fn open_session(&mut self, peer: PeerInfo, role: Role) -> bool {
        let transport = match self
            .factory
            .create(peer.id, &self.transport_config, self.transport_tx.clone())
            .await
        {
            Ok(transport) => transport,
            Err(e) => {
                error!("Failed to create transport for {}: {:?}", peer.id, e);
                return false;
            }
        };

        if let Err(e) = transport.attach_tracks(&self.media).await {
            warn!("Failed to attach local tracks for {}: {:?}", peer.id, e);
        }

        let mut session = PeerSession::new(peer.id, peer.color.clone(), role, transport);
        if let Some(early) = self.early_candidates.remove(&peer.id) {
            session.queue_candidates(early);
        }
        self.sessions.insert(peer.id, session);

        info!("Opened session with {} as {:?}", peer.id, role);
        self.observer.on_peer_added(peer).await;
        true
    }

    async fn send_offer(&mut self, remote: PeerId) {
        let Some(session) = self.sessions.get(&remote) else {
            return;
        };
        let offer = match session.transport().create_offer().await {
            Ok(offer) => offer,
            Err(e) => {
                error!("Failed to create offer for {}: {:?}", remote, e);
                self.fail(remote).await;
                return;
            }
        };

        self.advance(remote, NegotiationEvent::OfferSent).await;
        self.signaling
            .send(SignalMessage::offer_to(remote, offer))
            .await;
    }

    async fn flush_candidates(&mut self, remote: PeerId) {
        let Some(session) = self.sessions.get_mut(&remote) else {
            return;
        };
        let pending = session.take_pending_candidates();
        if pending.is_empty() {
            return;
        }

        debug!("Applying {} held candidates from {}", pending.len(), remote);
        for candidate in pending {
            if let Err(e) = session.transport().add_ice_candidate(candidate).await {
                warn!("Failed to add candidate from {}: {:?}", remote, e);
            }
        }
    }

    /// Applies `event` to the session for `remote`. Returns whether the state changed.
    async fn advance(&mut self, remote: PeerId, event: NegotiationEvent) -> bool {
        let Some(session) = self.sessions.get_mut(&remote) else {
            return false;
        };
        match session.advance(event) {
            Ok(state) => {
                debug!("Session {} is now {:?}", remote, state);
                self.observer.on_peer_state(remote, state).await;
                true
            }
            Err(e) => {
                debug!("Session {}: {}", remote, e);
                false
            }
        }
    }

    /// Marks one session failed. Other sessions are unaffected and the
    /// failed one stays until its peer leaves.
    async fn fail(&mut self, remote: PeerId) {
        if self.advance(remote, NegotiationEvent::TransportFailed).await {
            error!("Session with {} failed", remote);
        }
    }

    async fn close_all(&mut self) {
        let sessions: Vec<_> = self.sessions.drain().collect();
        for (peer_id, session) in sessions {
            if let Err(e) = session.transport().close().await {
                warn!("Failed to close transport for {}: {:?}", peer_id, e);
            }
            self.observer.on_peer_removed(peer_id).await;
        }
        self.early_candidates.clear();
    }

    fn snapshot(&self) -> OrchestratorSnapshot {
        let mut sessions: Vec<_> = self.sessions.values().map(PeerSession::snapshot).collect();
        sessions.sort_by_key(|s| s.remote);
        OrchestratorSnapshot {
            local: self.local.clone(),
            sessions,
        }
    }

    fn is_self(&self, peer_id: PeerId) -> bool {
        self.local.as_ref().is_some_and(|local| local.id == peer_id)
    }

    fn is_known(&self, peer_id: PeerId) -> bool {
        self.is_self(peer_id) || self.sessions.contains_key(&peer_id)
    }
}

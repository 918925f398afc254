use crate::session::{InvalidTransition, NegotiationEvent, NegotiationState, Role};
use crate::transport::PeerTransport;
use gravity_core::{Color, IceCandidate, PeerId};

/// One remote participant as seen by this client: its transport, where the
/// offer/answer exchange stands, and candidates waiting for a remote
/// description.
pub struct PeerSession {
    remote: PeerId,
    color: Color,
    role: Role,
    state: NegotiationState,
    transport: Box<dyn PeerTransport>,
    pending_candidates: Vec<IceCandidate>,
}

/// Read-only view of a session, safe to hand out of the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub remote: PeerId,
    pub color: Color,
    pub role: Role,
    pub state: NegotiationState,
}

impl PeerSession {
    pub fn new(remote: PeerId, color: Color, role: Role, transport: Box<dyn PeerTransport>) -> Self {
        Self {
            remote,
            color,
            role,
            state: NegotiationState::Idle,
            transport,
            pending_candidates: Vec::new(),
        }
    }

    pub fn remote(&self) -> PeerId {
        self.remote
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn transport(&self) -> &dyn PeerTransport {
        self.transport.as_ref()
    }

    /// Applies `event`. On error the state is left untouched.
    pub fn advance(&mut self, event: NegotiationEvent) -> Result<NegotiationState, InvalidTransition> {
        self.state = self.state.on(event)?;
        Ok(self.state)
    }

    pub fn queue_candidate(&mut self, candidate: IceCandidate) {
        self.pending_candidates.push(candidate);
    }

    pub fn queue_candidates(&mut self, candidates: impl IntoIterator<Item = IceCandidate>) {
        self.pending_candidates.extend(candidates);
    }

    pub fn take_pending_candidates(&mut self) -> Vec<IceCandidate> {
        std::mem::take(&mut self.pending_candidates)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            remote: self.remote,
            color: self.color.clone(),
            role: self.role,
            state: self.state,
        }
    }
}

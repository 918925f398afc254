use thiserror::Error;

/// Which side of the offer/answer exchange this client plays for a remote peer.
///
/// The member already in the room offers to a newcomer, so each pair of
/// peers has exactly one offerer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Offerer,
    Answerer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationState {
    /// Transport created, nothing exchanged yet.
    Idle,
    /// Local offer applied and sent, waiting for the answer.
    Offering,
    /// Remote offer applied, answer not yet produced.
    OfferReceived,
    /// Answer applied locally and sent.
    Answering,
    /// Offerer applied the remote answer.
    Negotiated,
    Connected,
    Failed,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationEvent {
    OfferSent,
    OfferReceived,
    AnswerSent,
    AnswerReceived,
    TransportConnected,
    TransportFailed,
    TransportClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot apply {event:?} in state {state:?}")]
pub struct InvalidTransition {
    pub state: NegotiationState,
    pub event: NegotiationEvent,
}

impl NegotiationState {
    /// Returns the state reached by applying `event`, or an error if the
    /// event is not valid here. The caller keeps its current state on error.
    pub fn on(self, event: NegotiationEvent) -> Result<Self, InvalidTransition> {
        use NegotiationEvent as E;
        use NegotiationState as S;

        match (self, event) {
            (S::Idle, E::OfferSent) => Ok(S::Offering),
            (S::Idle, E::OfferReceived) => Ok(S::OfferReceived),
            (S::OfferReceived, E::AnswerSent) => Ok(S::Answering),
            (S::Offering, E::AnswerReceived) => Ok(S::Negotiated),
            (S::Negotiated | S::Answering | S::Connected, E::TransportConnected) => Ok(S::Connected),
            (state, E::TransportFailed) if !state.is_terminal() => Ok(S::Failed),
            (state, E::TransportClosed) if !state.is_terminal() => Ok(S::Closed),
            (state, event) => Err(InvalidTransition { state, event }),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Closed)
    }

    /// Whether a remote description has been applied, i.e. remote ICE
    /// candidates can be handed to the transport directly.
    pub fn has_remote_description(self) -> bool {
        matches!(
            self,
            Self::OfferReceived | Self::Answering | Self::Negotiated | Self::Connected
        )
    }

    /// Whether candidates arriving now must be held until a remote
    /// description is applied.
    pub fn buffers_candidates(self) -> bool {
        matches!(self, Self::Idle | Self::Offering)
    }
}

mod negotiation;
mod peer_session;

pub use negotiation::*;
pub use peer_session::*;

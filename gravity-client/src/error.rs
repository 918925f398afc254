use gravity_core::ProtocolError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to relay at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    #[error("failed to send join request: {0}")]
    Join(#[source] tungstenite::Error),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("orchestrator is no longer running")]
    OrchestratorGone,
}

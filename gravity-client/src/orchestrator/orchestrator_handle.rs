use crate::error::ClientError;
use crate::media::LocalTrack;
use crate::orchestrator::{OrchestratorCommand, OrchestratorSnapshot};
use crate::session::NegotiationState;
use gravity_core::PeerId;
use tokio::sync::{mpsc, oneshot};

/// Cloneable handle for talking to a running [`PeerOrchestrator`](crate::PeerOrchestrator).
#[derive(Debug, Clone)]
pub struct OrchestratorHandle {
    command_tx: mpsc::Sender<OrchestratorCommand>,
}

impl OrchestratorHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<OrchestratorCommand>) -> Self {
        Self { command_tx }
    }

    pub async fn replace_local_track(&self, track: LocalTrack) -> Result<(), ClientError> {
        self.send(OrchestratorCommand::ReplaceTrack(track)).await
    }

    pub async fn report_media_error(&self, reason: impl Into<String>) -> Result<(), ClientError> {
        self.send(OrchestratorCommand::MediaError(reason.into())).await
    }

    pub async fn snapshot(&self) -> Result<OrchestratorSnapshot, ClientError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(OrchestratorCommand::Snapshot(reply_tx)).await?;
        reply_rx.await.map_err(|_| ClientError::OrchestratorGone)
    }

    /// Local participant plus one per open session.
    pub async fn participant_count(&self) -> Result<usize, ClientError> {
        Ok(self.snapshot().await?.participant_count())
    }

    pub async fn session_state(&self, peer_id: PeerId) -> Result<Option<NegotiationState>, ClientError> {
        Ok(self.snapshot().await?.session(peer_id).map(|s| s.state))
    }

    pub async fn hangup(&self) -> Result<(), ClientError> {
        self.send(OrchestratorCommand::Hangup).await
    }

    async fn send(&self, cmd: OrchestratorCommand) -> Result<(), ClientError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| ClientError::OrchestratorGone)
    }
}

use crate::media::LocalTrack;
use crate::orchestrator::OrchestratorSnapshot;
use tokio::sync::oneshot;

/// Local requests for the orchestrator, sent through an [`OrchestratorHandle`](crate::OrchestratorHandle).
#[derive(Debug)]
pub enum OrchestratorCommand {
    /// Swap the local source of one kind in every session, without renegotiation.
    ReplaceTrack(LocalTrack),

    /// Local capture failed. Existing sessions continue.
    MediaError(String),

    Snapshot(oneshot::Sender<OrchestratorSnapshot>),

    /// Close every session and stop.
    Hangup,
}

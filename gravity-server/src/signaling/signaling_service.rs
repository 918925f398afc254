use crate::relay::RelayCommand;
use crate::signaling::{Outbound, RelayRequest, SignalingOutput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use gravity_core::PeerId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Write half of every live WebSocket, keyed by client identity.
///
/// The relay delivers through this alone. It holds no relay sender, so the
/// relay stops once every [`SignalingService`] is gone.
#[derive(Default)]
pub struct PeerSinks {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
}

impl PeerSinks {
    fn send_text(&self, peer_id: PeerId, json: String) {
        if let Some(peer) = self.peers.get(&peer_id) {
            if let Err(e) = peer.send(Message::Text(json.into())) {
                error!("Failed to send WS message to {}: {:?}", peer_id, e);
            }
        } else {
            debug!("Dropping message for disconnected client {}", peer_id);
        }
    }
}

#[async_trait]
impl SignalingOutput for PeerSinks {
    async fn deliver(&self, peer_id: PeerId, message: Outbound) {
        match message.to_json() {
            Ok(json) => self.send_text(peer_id, json),
            Err(e) => error!("Failed to serialize {} message: {}", message.kind(), e),
        }
    }
}

/// Registers connections in the shared [`PeerSinks`] and feeds decoded
/// client requests to the relay.
#[derive(Clone)]
pub struct SignalingService {
    sinks: Arc<PeerSinks>,
    relay_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            sinks: Arc::new(PeerSinks::default()),
            relay_tx,
        }
    }

    /// The sinks the relay should deliver through.
    pub fn sinks(&self) -> Arc<PeerSinks> {
        self.sinks.clone()
    }

    /// Assigns a fresh identity to a new connection and registers it with
    /// the relay. The client is not in any room until it sends `join`.
    pub async fn register(&self, tx: mpsc::UnboundedSender<Message>) -> Result<PeerId> {
        let peer_id = PeerId::new();
        self.sinks.peers.insert(peer_id, tx);

        self.relay_tx
            .send(RelayCommand::Register { peer_id })
            .await
            .context("relay is not running")?;

        Ok(peer_id)
    }

    /// Drops the connection and lets the relay announce the departure.
    pub async fn unregister(&self, peer_id: &PeerId) {
        self.sinks.peers.remove(peer_id);

        if let Err(e) = self
            .relay_tx
            .send(RelayCommand::Unregister { peer_id: *peer_id })
            .await
        {
            error!("Relay died before {} was unregistered: {}", peer_id, e);
        }
    }

    /// Handles one text frame from a client. Malformed frames are dropped
    /// without a reply; only a dead relay is reported back.
    pub async fn dispatch(&self, peer_id: PeerId, text: &str) -> Result<()> {
        let request = match RelayRequest::parse(text) {
            Ok(Some(request)) => request,
            Ok(None) => {
                debug!("Ignoring unsupported message from {}", peer_id);
                return Ok(());
            }
            Err(e) => {
                warn!("Invalid message from {}: {}", peer_id, e);
                return Ok(());
            }
        };

        let cmd = match request {
            RelayRequest::Join { room } => RelayCommand::Join { peer_id, room },
            RelayRequest::Forward { target, envelope } => RelayCommand::Forward {
                source: peer_id,
                target,
                envelope,
            },
        };

        self.relay_tx.send(cmd).await.context("relay is not running")?;
        Ok(())
    }
}

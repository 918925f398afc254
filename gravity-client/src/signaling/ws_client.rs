use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::media::LocalMedia;
use crate::orchestrator::{OrchestratorHandle, PeerObserver, PeerOrchestrator};
use crate::signaling::ChannelSignaling;
use crate::transport::TransportFactory;
use futures::{SinkExt, StreamExt};
use gravity_core::SignalMessage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// A joined call: the orchestrator task and the two halves of the relay socket.
pub struct Client {
    handle: OrchestratorHandle,
    orchestrator: JoinHandle<()>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

/// Opens the relay WebSocket, sends `join` for the configured room and
/// starts the orchestrator. Every transport `factory` creates is built from
/// `config.transport`.
pub async fn connect(
    config: ClientConfig,
    factory: Arc<dyn TransportFactory>,
    media: LocalMedia,
    observer: Arc<dyn PeerObserver>,
) -> Result<Client, ClientError> {
    let (ws_stream, _) = connect_async(config.relay_url.as_str())
        .await
        .map_err(|source| ClientError::Connect {
            url: config.relay_url.clone(),
            source,
        })?;
    info!("Connected to relay at {}", config.relay_url);

    let (mut ws_write, mut ws_read) = ws_stream.split();

    let join = SignalMessage::Join {
        room: config.room.clone(),
    }
    .to_json()?;
    ws_write
        .send(Message::Text(join.into()))
        .await
        .map_err(ClientError::Join)?;
    info!("Joining room {}", config.room);

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<SignalMessage>();
    let (signal_tx, signal_rx) = mpsc::channel(256);

    let (orchestrator, handle) = PeerOrchestrator::new(
        signal_rx,
        Arc::new(ChannelSignaling::new(out_tx)),
        factory,
        config.transport,
        observer,
        media,
    );
    let orchestrator = tokio::spawn(orchestrator.run());

    let writer = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let text = match msg.to_json() {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to encode {}: {}", msg.kind(), e);
                    continue;
                }
            };
            if ws_write.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_write.close().await;
    });

    let reader = tokio::spawn(async move {
        while let Some(frame) = ws_read.next().await {
            match frame {
                Ok(Message::Text(text)) => match SignalMessage::from_json(&text) {
                    Ok(msg) => {
                        if signal_tx.send(msg).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => debug!("Ignoring relay frame: {}", e),
                },
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!("Relay connection error: {}", e);
                    break;
                }
            }
        }
        info!("Relay connection closed");
    });

    Ok(Client {
        handle,
        orchestrator,
        reader,
        writer,
    })
}

impl Client {
    pub fn handle(&self) -> &OrchestratorHandle {
        &self.handle
    }

    /// Closes every session and the relay connection. The relay then tells
    /// the other members we left.
    pub async fn hangup(self) -> Result<(), ClientError> {
        let result = self.handle.hangup().await;
        let Self {
            orchestrator,
            reader,
            writer,
            ..
        } = self;
        join_tasks(orchestrator, reader, writer).await;
        result
    }

    /// Waits for the orchestrator to stop, which happens on hangup or once
    /// the relay is gone and no other handle is left.
    pub async fn wait(self) {
        let Self {
            handle,
            orchestrator,
            reader,
            writer,
        } = self;
        drop(handle);
        join_tasks(orchestrator, reader, writer).await;
    }
}

async fn join_tasks(orchestrator: JoinHandle<()>, reader: JoinHandle<()>, writer: JoinHandle<()>) {
    let _ = orchestrator.await;
    // The writer stops once the orchestrator drops its signaling sender.
    let _ = writer.await;
    reader.abort();
}

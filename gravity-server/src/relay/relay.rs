use crate::relay::{Delivery, Registry, RelayCommand};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The relay actor. It is the only owner of the [`Registry`], so register,
/// join, route and unregister are applied one at a time in arrival order.
pub struct Relay {
    registry: Registry,
    command_rx: mpsc::Receiver<RelayCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry: Registry::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Relay stopped.");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Register { peer_id } => {
                let registration = self.registry.register(peer_id);
                info!(
                    "Client {} registered with color {}",
                    peer_id, registration.color
                );
            }

            RelayCommand::Join { peer_id, room } => {
                let deliveries = self.registry.join(peer_id, room);
                self.deliver_all(deliveries).await;
            }

            RelayCommand::Forward {
                source,
                target,
                envelope,
            } => {
                let Some(delivery) = self.registry.route(source, target, envelope) else {
                    return;
                };
                debug!(
                    "Forwarding {} from {} to {}",
                    delivery.message.kind(),
                    source,
                    target
                );
                self.deliver(delivery).await;
            }

            RelayCommand::Unregister { peer_id } => {
                let deliveries = self.registry.unregister(&peer_id);
                self.deliver_all(deliveries).await;
            }
        }
    }

    async fn deliver_all(&self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            self.deliver(delivery).await;
        }
    }

    async fn deliver(&self, delivery: Delivery) {
        self.signaling.deliver(delivery.to, delivery.message).await;
    }
}

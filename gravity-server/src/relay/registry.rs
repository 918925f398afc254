use crate::relay::Registration;
use crate::signaling::Outbound;
use gravity_core::{PeerId, PeerInfo, RoomId, SignalMessage};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// One frame the relay has to write to one client.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: PeerId,
    pub message: Outbound,
}

impl Delivery {
    fn signal(to: PeerId, msg: SignalMessage) -> Self {
        Self {
            to,
            message: Outbound::Signal(msg),
        }
    }
}

/// Client registrations plus a `room -> members` index.
///
/// Every method is synchronous and returns the frames to send, so the
/// caller decides how writes happen. Room members are kept in join order.
#[derive(Debug, Default)]
pub struct Registry {
    clients: HashMap<PeerId, Registration>,
    rooms: HashMap<RoomId, Vec<PeerId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, peer_id: PeerId) -> &Registration {
        self.clients
            .entry(peer_id)
            .or_insert_with(|| Registration::new(peer_id))
    }

    /// Binds the client to `room` on its first join and produces the
    /// `welcome`, the `existing-peers` snapshot and the `peer-join`
    /// broadcast. Later joins are ignored.
    pub fn join(&mut self, peer_id: PeerId, room: RoomId) -> Vec<Delivery> {
        let Some(registration) = self.clients.get_mut(&peer_id) else {
            warn!("Join from unregistered client {}", peer_id);
            return Vec::new();
        };

        if let Some(current) = &registration.room {
            debug!(
                "Client {} already in room {}, ignoring join to {}",
                peer_id, current, room
            );
            return Vec::new();
        }

        registration.room = Some(room.clone());
        let me = registration.info();

        let members = self.rooms.entry(room.clone()).or_default();
        let existing: Vec<PeerInfo> = members
            .iter()
            .filter_map(|id| self.clients.get(id).map(Registration::info))
            .collect();
        members.push(peer_id);

        info!(
            "Client {} joined room {} ({} already present)",
            peer_id,
            room,
            existing.len()
        );

        let mut out = Vec::with_capacity(existing.len() + 2);
        out.push(Delivery::signal(
            peer_id,
            SignalMessage::Welcome {
                id: me.id,
                color: me.color.clone(),
            },
        ));

        if !existing.is_empty() {
            out.push(Delivery::signal(
                peer_id,
                SignalMessage::ExistingPeers {
                    peers: existing.clone(),
                },
            ));
        }

        out.extend(existing.iter().map(|other| {
            Delivery::signal(
                other.id,
                SignalMessage::PeerJoin {
                    id: me.id,
                    color: me.color.clone(),
                },
            )
        }));

        out
    }

    /// Stamps `source` on a directed message and addresses it to `target`.
    ///
    /// Returns `None` when the sender has not joined a room yet or the
    /// target is not registered.
    pub fn route(
        &self,
        source: PeerId,
        target: PeerId,
        mut envelope: Map<String, Value>,
    ) -> Option<Delivery> {
        if !self.clients.get(&source)?.has_joined() {
            debug!("Dropping message from {} sent before join", source);
            return None;
        }

        if !self.clients.contains_key(&target) {
            debug!("Dropping message from {} to unknown target {}", source, target);
            return None;
        }

        envelope.insert("source".to_owned(), Value::String(source.to_string()));

        Some(Delivery {
            to: target,
            message: Outbound::Relayed(envelope),
        })
    }

    /// Removes the client and produces the `peer-leave` broadcast for the
    /// room it was in, if any.
    pub fn unregister(&mut self, peer_id: &PeerId) -> Vec<Delivery> {
        let Some(registration) = self.clients.remove(peer_id) else {
            return Vec::new();
        };

        let Some(room) = registration.room else {
            return Vec::new();
        };

        let Some(members) = self.rooms.get_mut(&room) else {
            return Vec::new();
        };
        members.retain(|id| id != peer_id);

        let out = members
            .iter()
            .map(|id| Delivery::signal(*id, SignalMessage::PeerLeave { id: *peer_id }))
            .collect();

        if members.is_empty() {
            debug!("Room {} is empty, dropping it", room);
            self.rooms.remove(&room);
        }

        info!("Client {} left room {}", peer_id, room);
        out
    }

    pub fn get(&self, peer_id: &PeerId) -> Option<&Registration> {
        self.clients.get(peer_id)
    }

    pub fn room_members(&self, room: &RoomId) -> &[PeerId] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or_default()
    }

    #[cfg(test)]
    fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

use crate::media::{LocalMedia, LocalTrack, RemoteTrack, TrackKind};
use crate::transport::{PeerTransport, TransportConfig, TransportEvent, TransportFactory};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use gravity_core::{IceCandidate, PeerId, SdpType, SessionDescription};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiverInit;
use webrtc::rtp_transceiver::rtp_sender::RTCRtpSender;
use webrtc::rtp_transceiver::rtp_transceiver_direction::RTCRtpTransceiverDirection;

/// [`PeerTransport`] backed by a `webrtc` peer connection.
pub struct RtcTransport {
    peer_id: PeerId,
    peer_connection: Arc<RTCPeerConnection>,
    senders: Mutex<HashMap<TrackKind, Arc<RTCRtpSender>>>,
}

impl RtcTransport {
    pub async fn new(
        peer_id: PeerId,
        config: &TransportConfig,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()
            .context("Failed to register default codecs")?;
        let registry = register_default_interceptors(Registry::new(), &mut m)
            .context("Failed to register interceptors")?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );

        let state_tx = event_tx.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!("Peer connection state for {}: {:?}", peer_id, s);
                    let event = match s {
                        RTCPeerConnectionState::Connected => TransportEvent::Connected(peer_id),
                        RTCPeerConnectionState::Failed => TransportEvent::Failed(peer_id),
                        RTCPeerConnectionState::Closed => TransportEvent::Closed(peer_id),
                        _ => return,
                    };
                    let _ = tx.send(event).await;
                })
            },
        ));

        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let init = match candidate.to_json() {
                    Ok(init) => init,
                    Err(e) => {
                        warn!("Failed to serialize local candidate for {}: {:?}", peer_id, e);
                        return;
                    }
                };
                let candidate = IceCandidate {
                    candidate: init.candidate,
                    sdp_mid: init.sdp_mid,
                    sdp_m_line_index: init.sdp_mline_index,
                    username_fragment: init.username_fragment,
                };
                let _ = tx
                    .send(TransportEvent::CandidateGenerated(peer_id, candidate))
                    .await;
            })
        }));

        let track_tx = event_tx;
        peer_connection.on_track(Box::new(move |track, _receiver, _transceiver| {
            let tx = track_tx.clone();

            Box::pin(async move {
                let Some(remote) = RemoteTrack::from_rtc(track) else {
                    debug!("Ignoring track of unknown kind from {}", peer_id);
                    return;
                };
                debug!("Remote {:?} track {} from {}", remote.kind, remote.id, peer_id);
                let _ = tx.send(TransportEvent::TrackAvailable(peer_id, remote)).await;
            })
        }));

        Ok(Self {
            peer_id,
            peer_connection,
            senders: Mutex::new(HashMap::new()),
        })
    }

    /// Adds a receive-only transceiver for each kind we are not sending, so
    /// the offer asks for the peer's audio and video either way.
    async fn ensure_receivers(&self) -> Result<()> {
        let senders = self.senders.lock().await;
        for kind in TrackKind::ALL {
            if senders.contains_key(&kind) {
                continue;
            }
            self.peer_connection
                .add_transceiver_from_kind(
                    kind.codec_type(),
                    Some(RTCRtpTransceiverInit {
                        direction: RTCRtpTransceiverDirection::Recvonly,
                        send_encodings: vec![],
                    }),
                )
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PeerTransport for RtcTransport {
    async fn attach_tracks(&self, media: &LocalMedia) -> Result<()> {
        let mut senders = self.senders.lock().await;
        for track in media.tracks() {
            if let Some(sender) = senders.get(&track.kind()) {
                sender.replace_track(Some(track.as_track_local())).await?;
                continue;
            }

            let sender = self
                .peer_connection
                .add_track(track.as_track_local())
                .await
                .with_context(|| format!("Failed to add {:?} track", track.kind()))?;

            // Drain RTCP so the interceptors keep running.
            let rtcp_sender = sender.clone();
            tokio::spawn(async move {
                let mut rtcp_buf = vec![0u8; 1500];
                while let Ok((_, _)) = rtcp_sender.read(&mut rtcp_buf).await {}
            });

            senders.insert(track.kind(), sender);
        }
        Ok(())
    }

    async fn replace_track(&self, track: &LocalTrack) -> Result<()> {
        let senders = self.senders.lock().await;
        let Some(sender) = senders.get(&track.kind()) else {
            debug!("No {:?} sender towards {}", track.kind(), self.peer_id);
            return Ok(());
        };
        sender.replace_track(Some(track.as_track_local())).await?;
        Ok(())
    }

    async fn create_offer(&self) -> Result<SessionDescription> {
        self.ensure_receivers().await?;
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_remote_description(&self, description: SessionDescription) -> Result<()> {
        let desc = match description.kind {
            SdpType::Offer => RTCSessionDescription::offer(description.sdp)?,
            SdpType::Answer => RTCSessionDescription::answer(description.sdp)?,
            other => bail!("unsupported remote description type {:?}", other),
        };
        self.peer_connection
            .set_remote_description(desc)
            .await
            .context("Failed to apply remote description")?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: candidate.sdp_mid,
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: candidate.username_fragment,
        };
        self.peer_connection
            .add_ice_candidate(init)
            .await
            .context("Failed to add ICE candidate")?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

/// Builds an [`RtcTransport`] per remote peer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtcTransportFactory;

#[async_trait]
impl TransportFactory for RtcTransportFactory {
    async fn create(
        &self,
        peer_id: PeerId,
        config: &TransportConfig,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>> {
        let transport = RtcTransport::new(peer_id, config, events).await?;
        Ok(Box::new(transport))
    }
}

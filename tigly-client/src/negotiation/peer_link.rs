use crate::config::CallConfig;
use crate::error::NegotiationError;
use crate::media::LocalMediaSource;
use crate::negotiation::PeerEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

/// One negotiated peer session. At most one link exists per room
/// assignment; its existence doubles as the "setup already ran" guard, so
/// re-entrant setup can never produce a second session or duplicate offer.
pub struct PeerLink {
    epoch: u64,
    pc: Arc<RTCPeerConnection>,
    closed: AtomicBool,
}

impl PeerLink {
    /// Builds the peer connection, registers the whole callback group
    /// atomically, and attaches every local track before any negotiation
    /// step runs.
    pub async fn connect(
        epoch: u64,
        config: &CallConfig,
        media: &LocalMediaSource,
        event_tx: mpsc::Sender<PeerEvent>,
    ) -> Result<Self, NegotiationError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|s| RTCIceServer {
                    urls: s.urls.clone(),
                    username: s.username.clone().unwrap_or_default(),
                    credential: s.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let pc = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = event_tx.clone();
        pc.on_peer_connection_state_change(Box::new(move |state| {
            let tx = state_tx.clone();
            Box::pin(async move {
                let _ = tx.send(PeerEvent::StateChanged { epoch, state }).await;
            })
        }));

        // Advisory only: observed for diagnostics, never blocked on.
        pc.on_ice_connection_state_change(Box::new(move |state| {
            Box::pin(async move {
                debug!(?state, epoch, "ice connection state changed");
            })
        }));
        pc.on_ice_gathering_state_change(Box::new(move |state| {
            Box::pin(async move {
                debug!(?state, epoch, "ice gathering state changed");
            })
        }));

        let candidate_tx = event_tx.clone();
        pc.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = candidate_tx.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let _ = tx
                    .send(PeerEvent::CandidateDiscovered {
                        epoch,
                        candidate: init,
                    })
                    .await;
            })
        }));

        let track_tx = event_tx.clone();
        pc.on_track(Box::new(move |track, _receiver, _transceiver| {
            let tx = track_tx.clone();
            Box::pin(async move {
                info!(kind = %track.kind(), epoch, "remote track event");
                let _ = tx.send(PeerEvent::TrackArrived { epoch, track }).await;
            })
        }));

        for track in media.tracks() {
            pc.add_track(Arc::clone(&track) as Arc<dyn TrackLocal + Send + Sync>)
                .await?;
        }

        Ok(Self {
            epoch,
            pc,
            closed: AtomicBool::new(false),
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Offerer step: generate the local offer, set it as the local
    /// description and return the SDP to relay outward.
    pub async fn create_offer(&self) -> Result<String, NegotiationError> {
        self.ensure_open()?;
        let offer = self.pc.create_offer(None).await?;
        self.pc.set_local_description(offer).await?;
        let desc = self
            .pc
            .local_description()
            .await
            .ok_or(NegotiationError::LocalDescriptionMissing)?;
        Ok(desc.sdp)
    }

    pub async fn apply_remote_offer(&self, sdp: String) -> Result<(), NegotiationError> {
        self.ensure_open()?;
        let desc = RTCSessionDescription::offer(sdp)?;
        self.pc.set_remote_description(desc).await?;
        Ok(())
    }

    /// Answerer step: generate the local answer against the applied remote
    /// offer, set it locally and return the SDP to relay outward.
    pub async fn create_answer(&self) -> Result<String, NegotiationError> {
        self.ensure_open()?;
        let answer = self.pc.create_answer(None).await?;
        self.pc.set_local_description(answer).await?;
        let desc = self
            .pc
            .local_description()
            .await
            .ok_or(NegotiationError::LocalDescriptionMissing)?;
        Ok(desc.sdp)
    }

    pub async fn apply_remote_answer(&self, sdp: String) -> Result<(), NegotiationError> {
        self.ensure_open()?;
        let desc = RTCSessionDescription::answer(sdp)?;
        self.pc.set_remote_description(desc).await?;
        Ok(())
    }

    /// Whether the remote description has been applied; gates immediate
    /// candidate application versus buffering.
    pub async fn remote_description_set(&self) -> bool {
        !self.closed.load(Ordering::SeqCst) && self.pc.remote_description().await.is_some()
    }

    pub async fn apply_candidate(&self, candidate: serde_json::Value) -> Result<(), NegotiationError> {
        self.ensure_open()?;
        let init: RTCIceCandidateInit = serde_json::from_value(candidate)?;
        self.pc.add_ice_candidate(init).await?;
        Ok(())
    }

    /// Closes the underlying connection. Idempotent; once closed every
    /// further operation fails with `SessionClosed`.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.pc.close().await {
            debug!(error = %e, epoch = self.epoch, "peer connection close failed");
        }
    }

    fn ensure_open(&self) -> Result<(), NegotiationError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(NegotiationError::SessionClosed);
        }
        Ok(())
    }
}

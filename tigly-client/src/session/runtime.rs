use crate::config::CallConfig;
use crate::error::MediaError;
use crate::media::{LocalMediaSource, MediaAcquirer, RemoteMediaOutput};
use crate::negotiation::{CandidateBuffer, PeerEvent, PeerLink};
use crate::session::SessionHandle;
use crate::signaling::SignalingClient;
use std::sync::Arc;
use tigly_core::{
    ClientMessage, Identity, NegotiationRole, RoomAssignment, RoomStatus, ServerMessage, SessionId,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Event-loop that owns one participant's entire call lifecycle: queue
/// membership, media acquisition, and the negotiation state machine. All
/// negotiation steps run on this single task, so no two steps for the same
/// session ever execute concurrently.
pub struct SessionRuntime {
    session_id: SessionId,
    identity: Identity,
    config: CallConfig,
    acquirer: Arc<dyn MediaAcquirer>,
    signaling: Arc<dyn SignalingClient>,
    server_rx: mpsc::Receiver<ServerMessage>,
    peer_tx: mpsc::Sender<PeerEvent>,
    peer_rx: mpsc::Receiver<PeerEvent>,
    shutdown_rx: mpsc::Receiver<()>,

    // Negotiation state. Link existence is the single idempotence guard:
    // while a link exists for the current assignment, setup re-runs are
    // no-ops and no second offer can be emitted.
    assignment: Option<RoomAssignment>,
    local_media: Option<LocalMediaSource>,
    link: Option<PeerLink>,
    epoch: u64,
    buffer: CandidateBuffer,
    pending_offer: Option<String>,
    remote_output: RemoteMediaOutput,

    // Read-only publications for the rendering layer.
    status_tx: watch::Sender<RoomStatus>,
    assignment_tx: watch::Sender<Option<RoomAssignment>>,
    local_media_tx: watch::Sender<Option<LocalMediaSource>>,
    remote_output_tx: watch::Sender<Option<RemoteMediaOutput>>,
}

impl SessionRuntime {
    pub fn new(
        session_id: SessionId,
        identity: Identity,
        config: CallConfig,
        acquirer: Arc<dyn MediaAcquirer>,
        signaling: Arc<dyn SignalingClient>,
        server_rx: mpsc::Receiver<ServerMessage>,
    ) -> (Self, SessionHandle) {
        let (peer_tx, peer_rx) = mpsc::channel(256);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let (status_tx, status_rx) = watch::channel(RoomStatus::Searching);
        let (assignment_tx, assignment_rx) = watch::channel(None);
        let (local_media_tx, local_media_rx) = watch::channel(None);
        let (remote_output_tx, remote_output_rx) = watch::channel(None);

        let handle = SessionHandle::new(
            session_id.clone(),
            identity.clone(),
            status_rx,
            assignment_rx,
            local_media_rx,
            remote_output_rx,
            shutdown_tx,
        );

        let runtime = Self {
            session_id,
            identity,
            config,
            acquirer,
            signaling,
            server_rx,
            peer_tx,
            peer_rx,
            shutdown_rx,
            assignment: None,
            local_media: None,
            link: None,
            epoch: 0,
            buffer: CandidateBuffer::new(),
            pending_offer: None,
            remote_output: RemoteMediaOutput::default(),
            status_tx,
            assignment_tx,
            local_media_tx,
            remote_output_tx,
        };

        (runtime, handle)
    }

    pub async fn run(mut self) {
        info!(session = %self.session_id, name = %self.identity, "session activated");

        self.signaling
            .send(ClientMessage::JoinRoom {
                name: self.identity.to_string(),
            })
            .await;

        // Acquisition runs concurrently with signaling: a match (or even an
        // early offer) may arrive before the local source is ready.
        let (media_tx, mut media_rx) = mpsc::channel::<Result<LocalMediaSource, MediaError>>(1);
        {
            let acquirer = Arc::clone(&self.acquirer);
            tokio::spawn(async move {
                let result = acquirer.acquire().await;
                let _ = media_tx.send(result).await;
            });
        }
        // The acquisition task drops its sender after the single send, so
        // this branch must go quiet once resolved or the closed receiver
        // would wake the loop on every iteration.
        let mut media_pending = true;

        loop {
            tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!(session = %self.session_id, "shutdown requested");
                    break;
                }

                msg = self.server_rx.recv() => {
                    match msg {
                        Some(m) => self.handle_server_message(m).await,
                        None => {
                            info!(session = %self.session_id, "signaling stream closed");
                            break;
                        }
                    }
                }

                event = self.peer_rx.recv() => {
                    if let Some(event) = event {
                        self.handle_peer_event(event).await;
                    }
                }

                result = media_rx.recv(), if media_pending => {
                    media_pending = false;
                    if let Some(result) = result {
                        self.handle_media_result(result).await;
                    }
                }
            }
        }

        self.teardown().await;
    }

    async fn handle_media_result(&mut self, result: Result<LocalMediaSource, MediaError>) {
        match result {
            Ok(source) => {
                info!(
                    session = %self.session_id,
                    tracks = source.active_track_count(),
                    "local media ready"
                );
                self.local_media = Some(source.clone());
                let _ = self.local_media_tx.send(Some(source));
                self.ensure_session().await;
            }
            Err(e) => {
                // Degraded mode: the view renders without local media and
                // no call proceeds for this session. No automatic retry.
                warn!(session = %self.session_id, error = %e, "media acquisition failed");
            }
        }
    }

    async fn handle_server_message(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::NewRoom { kind, room_id } => {
                self.handle_match(RoomAssignment {
                    room_id,
                    role: kind,
                })
                .await;
            }
            ServerMessage::Offer { sdp } => self.handle_offer(sdp).await,
            ServerMessage::Answer { sdp } => self.handle_answer(sdp).await,
            ServerMessage::IceCandidate { candidate } => self.handle_candidate(candidate).await,
        }
    }

    async fn handle_match(&mut self, assignment: RoomAssignment) {
        if self.assignment.as_ref() == Some(&assignment) {
            debug!(session = %self.session_id, "duplicate match notification ignored");
            return;
        }
        if self.assignment.is_some() {
            info!(session = %self.session_id, room = %assignment.room_id, "assignment superseded");
            self.teardown_negotiation().await;
        }

        info!(
            session = %self.session_id,
            room = %assignment.room_id,
            role = ?assignment.role,
            "matched with a peer"
        );
        self.assignment = Some(assignment.clone());
        let _ = self.assignment_tx.send(Some(assignment));
        let _ = self.status_tx.send(RoomStatus::Matched);
        self.ensure_session().await;
    }

    /// Creates the peer link once assignment, role and local media are all
    /// present, then runs the role's one-shot negotiation step. Safe to
    /// call any number of times: an existing link makes this a no-op.
    async fn ensure_session(&mut self) {
        if self.link.is_some() {
            return;
        }
        let Some(assignment) = self.assignment.clone() else {
            return;
        };
        let Some(media) = self.local_media.clone() else {
            debug!(session = %self.session_id, "awaiting local media before negotiation");
            return;
        };

        self.epoch += 1;
        let link = match PeerLink::connect(self.epoch, &self.config, &media, self.peer_tx.clone())
            .await
        {
            Ok(link) => link,
            Err(e) => {
                error!(session = %self.session_id, error = %e, "peer session creation failed");
                return;
            }
        };
        info!(
            session = %self.session_id,
            room = %assignment.room_id,
            epoch = self.epoch,
            "peer session created"
        );
        self.link = Some(link);
        self.remote_output = RemoteMediaOutput::default();
        let _ = self.remote_output_tx.send(None);

        match assignment.role {
            NegotiationRole::Offerer => self.send_offer(&assignment).await,
            NegotiationRole::Answerer => {
                if let Some(sdp) = self.pending_offer.take() {
                    self.accept_offer(sdp).await;
                }
            }
        }
    }

    async fn send_offer(&mut self, assignment: &RoomAssignment) {
        let Some(link) = self.link.as_ref() else {
            return;
        };
        match link.create_offer().await {
            Ok(sdp) => {
                info!(session = %self.session_id, room = %assignment.room_id, "sending offer");
                self.signaling
                    .send(ClientMessage::Offer {
                        room_id: assignment.room_id.clone(),
                        sdp,
                    })
                    .await;
            }
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "offer negotiation failed");
            }
        }
    }

    async fn handle_offer(&mut self, sdp: String) {
        let role = self.assignment.as_ref().map(|a| a.role);
        if role == Some(NegotiationRole::Offerer) {
            warn!(session = %self.session_id, "offer received while acting as offerer, dropped");
            return;
        }
        if self.link.is_some() && role == Some(NegotiationRole::Answerer) {
            self.accept_offer(sdp).await;
        } else {
            // The offer can race ahead of match/media; hold the latest one
            // until the peer session exists.
            debug!(session = %self.session_id, "offer held until peer session is ready");
            self.pending_offer = Some(sdp);
        }
    }

    /// Answerer path: apply the remote offer, drain the candidate buffer,
    /// then answer back.
    async fn accept_offer(&mut self, sdp: String) {
        let Some(assignment) = self.assignment.clone() else {
            return;
        };
        let Some(link) = self.link.as_ref() else {
            return;
        };

        if let Err(e) = link.apply_remote_offer(sdp).await {
            warn!(session = %self.session_id, error = %e, "remote offer rejected");
            return;
        }
        self.buffer.flush(|c| link.apply_candidate(c)).await;

        match link.create_answer().await {
            Ok(sdp) => {
                info!(session = %self.session_id, room = %assignment.room_id, "sending answer");
                self.signaling
                    .send(ClientMessage::Answer {
                        room_id: assignment.room_id.clone(),
                        sdp,
                    })
                    .await;
            }
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "answer negotiation failed");
            }
        }
    }

    async fn handle_answer(&mut self, sdp: String) {
        let role = self.assignment.as_ref().map(|a| a.role);
        if role != Some(NegotiationRole::Offerer) {
            warn!(session = %self.session_id, "answer received while not offerer, dropped");
            return;
        }
        let Some(link) = self.link.as_ref() else {
            warn!(session = %self.session_id, "answer arrived before our offer was sent, dropped");
            return;
        };

        if let Err(e) = link.apply_remote_answer(sdp).await {
            warn!(session = %self.session_id, error = %e, "remote answer rejected");
            return;
        }
        info!(session = %self.session_id, "remote answer applied");
        self.buffer.flush(|c| link.apply_candidate(c)).await;
    }

    async fn handle_candidate(&mut self, candidate: serde_json::Value) {
        match self.link.as_ref() {
            Some(link) if link.remote_description_set().await => {
                debug!(session = %self.session_id, "applying remote candidate");
                if let Err(e) = link.apply_candidate(candidate).await {
                    warn!(session = %self.session_id, error = %e, "remote candidate rejected");
                }
            }
            _ => {
                debug!(session = %self.session_id, "buffering remote candidate");
                self.buffer.push(candidate);
            }
        }
    }

    async fn handle_peer_event(&mut self, event: PeerEvent) {
        if self.link.is_none() || event.epoch() != self.epoch {
            debug!(session = %self.session_id, "event from torn-down peer session discarded");
            return;
        }

        match event {
            PeerEvent::CandidateDiscovered { candidate, .. } => {
                let Some(assignment) = self.assignment.as_ref() else {
                    return;
                };
                match serde_json::to_value(&candidate) {
                    Ok(value) => {
                        debug!(session = %self.session_id, "relaying local candidate");
                        self.signaling
                            .send(ClientMessage::IceCandidate {
                                room_id: assignment.room_id.clone(),
                                candidate: value,
                            })
                            .await;
                    }
                    Err(e) => {
                        warn!(session = %self.session_id, error = %e, "local candidate not serializable");
                    }
                }
            }
            PeerEvent::TrackArrived { track, .. } => {
                info!(session = %self.session_id, kind = %track.kind(), "remote track added");
                self.remote_output.add_track(track);
                let _ = self.remote_output_tx.send(Some(self.remote_output.clone()));
            }
            PeerEvent::StateChanged { state, .. } => {
                // Advisory: the state machine neither blocks nor retries on
                // connectivity transitions.
                info!(session = %self.session_id, ?state, "peer connection state changed");
            }
        }
    }

    /// Tears down everything tied to the current assignment so a fresh one
    /// starts from a clean slate. The local source survives: it belongs to
    /// the view, not to the match.
    async fn teardown_negotiation(&mut self) {
        if let Some(link) = self.link.take() {
            link.close().await;
        }
        self.buffer.clear();
        self.pending_offer = None;
        self.remote_output = RemoteMediaOutput::default();
        let _ = self.remote_output_tx.send(None);
    }

    async fn teardown(&mut self) {
        self.teardown_negotiation().await;

        if let Some(media) = self.local_media.take() {
            media.stop();
        }
        let _ = self.local_media_tx.send(None);

        self.signaling
            .send(ClientMessage::LeaveRoom {
                name: self.identity.to_string(),
            })
            .await;
        info!(session = %self.session_id, "session deactivated");
    }
}

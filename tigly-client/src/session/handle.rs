use crate::media::{LocalMediaSource, RemoteMediaOutput};
use tigly_core::{Identity, RoomAssignment, RoomStatus, SessionId};
use tokio::sync::{mpsc, watch};

/// Read-only view of a running session, handed to the rendering layer.
/// Everything observable here is published by the session runtime; the
/// rendering layer can watch, toggle local tracks, and request shutdown,
/// nothing else.
#[derive(Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    identity: Identity,
    status_rx: watch::Receiver<RoomStatus>,
    assignment_rx: watch::Receiver<Option<RoomAssignment>>,
    local_media_rx: watch::Receiver<Option<LocalMediaSource>>,
    remote_output_rx: watch::Receiver<Option<RemoteMediaOutput>>,
    shutdown_tx: mpsc::Sender<()>,
}

impl SessionHandle {
    pub(crate) fn new(
        session_id: SessionId,
        identity: Identity,
        status_rx: watch::Receiver<RoomStatus>,
        assignment_rx: watch::Receiver<Option<RoomAssignment>>,
        local_media_rx: watch::Receiver<Option<LocalMediaSource>>,
        remote_output_rx: watch::Receiver<Option<RemoteMediaOutput>>,
        shutdown_tx: mpsc::Sender<()>,
    ) -> Self {
        Self {
            session_id,
            identity,
            status_rx,
            assignment_rx,
            local_media_rx,
            remote_output_rx,
            shutdown_tx,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn status(&self) -> RoomStatus {
        *self.status_rx.borrow()
    }

    pub fn assignment(&self) -> Option<RoomAssignment> {
        self.assignment_rx.borrow().clone()
    }

    pub fn local_media(&self) -> Option<LocalMediaSource> {
        self.local_media_rx.borrow().clone()
    }

    pub fn remote_output(&self) -> Option<RemoteMediaOutput> {
        self.remote_output_rx.borrow().clone()
    }

    /// Fresh receivers for awaiting changes.
    pub fn watch_status(&self) -> watch::Receiver<RoomStatus> {
        self.status_rx.clone()
    }

    pub fn watch_remote_output(&self) -> watch::Receiver<Option<RemoteMediaOutput>> {
        self.remote_output_rx.clone()
    }

    /// Cooperative shutdown request; the runtime tears down and exits.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

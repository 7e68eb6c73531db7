use crate::config::CallConfig;
use crate::media::MediaAcquirer;
use crate::session::{SessionHandle, SessionRuntime};
use crate::signaling::SignalingClient;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use thiserror::Error;
use tigly_core::{Identity, ServerMessage, SessionId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("display name must not be empty")]
    EmptyIdentity,
}

struct SessionEntry {
    handle: SessionHandle,
    task: JoinHandle<()>,
}

/// Registry of running call sessions, one per display name. Starting the
/// same name twice reuses the live session instead of double-joining the
/// matching queue.
pub struct SessionManager {
    sessions: Arc<DashMap<Identity, SessionEntry>>,
    acquirer: Arc<dyn MediaAcquirer>,
    config: CallConfig,
}

impl SessionManager {
    pub fn new(acquirer: Arc<dyn MediaAcquirer>, config: CallConfig) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            acquirer,
            config,
        }
    }

    /// Spawns a session runtime for `identity`, wired to the given
    /// transport. `server_rx` feeds the runtime everything the signaling
    /// server pushes for this client.
    pub fn start(
        &self,
        identity: Identity,
        signaling: Arc<dyn SignalingClient>,
        server_rx: mpsc::Receiver<ServerMessage>,
    ) -> Result<SessionHandle, SessionError> {
        if identity.is_empty() {
            return Err(SessionError::EmptyIdentity);
        }

        match self.sessions.entry(identity.clone()) {
            Entry::Occupied(entry) => {
                warn!(name = %identity, "session already active, reusing");
                Ok(entry.get().handle.clone())
            }
            Entry::Vacant(entry) => {
                let session_id = SessionId::new();
                let (runtime, handle) = SessionRuntime::new(
                    session_id.clone(),
                    identity.clone(),
                    self.config.clone(),
                    Arc::clone(&self.acquirer),
                    signaling,
                    server_rx,
                );
                let task = tokio::spawn(runtime.run());
                info!(name = %identity, session = %session_id, "session started");
                entry.insert(SessionEntry {
                    handle: handle.clone(),
                    task,
                });
                Ok(handle)
            }
        }
    }

    pub fn is_active(&self, identity: &Identity) -> bool {
        self.sessions.contains_key(identity)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Stops the session for `identity` and waits for its teardown to
    /// finish. Unknown names are a no-op.
    pub async fn shutdown(&self, identity: &Identity) {
        let Some((_, entry)) = self.sessions.remove(identity) else {
            return;
        };
        entry.handle.shutdown().await;
        if let Err(e) = entry.task.await {
            warn!(name = %identity, error = %e, "session task ended abnormally");
        }
        info!(name = %identity, "session stopped");
    }

    pub async fn shutdown_all(&self) {
        let names: Vec<Identity> = self.sessions.iter().map(|e| e.key().clone()).collect();
        for name in names {
            self.shutdown(&name).await;
        }
    }
}

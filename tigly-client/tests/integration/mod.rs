pub mod lifecycle_tests;

use std::sync::Arc;
use tigly_client::{CallConfig, MediaAcquirer, SessionHandle, SessionManager, SyntheticAcquirer};
use tigly_core::{ClientMessage, Identity, ServerMessage};
use tokio::sync::mpsc;
use tracing::Level;

use crate::utils::MockSignalingClient;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_manager() -> SessionManager {
    create_test_manager_with(Arc::new(SyntheticAcquirer::new()))
}

pub fn create_test_manager_with(acquirer: Arc<dyn MediaAcquirer>) -> SessionManager {
    // Loopback-only: host candidates are enough inside one process.
    SessionManager::new(acquirer, CallConfig::without_ice_servers())
}

/// Starts a session wired to a capturing mock transport. Returns the
/// handle, the captured outbound stream, and the sender feeding the
/// session its inbound server messages.
pub fn start_test_session(
    manager: &SessionManager,
    name: &str,
) -> (
    SessionHandle,
    MockSignalingClient,
    mpsc::UnboundedReceiver<ClientMessage>,
    mpsc::Sender<ServerMessage>,
) {
    let (signaling, outbound_rx) = MockSignalingClient::new();
    let (server_tx, server_rx) = mpsc::channel(100);
    let handle = manager
        .start(Identity::from(name), Arc::new(signaling.clone()), server_rx)
        .expect("failed to start session");
    (handle, signaling, outbound_rx, server_tx)
}

use async_trait::async_trait;
use std::sync::Arc;
use tigly_core::{ClientMessage, RoomId};
use tokio::sync::{Mutex, mpsc};

/// Mock SignalingClient that captures every outgoing message.
#[derive(Clone)]
pub struct MockSignalingClient {
    /// Channel mirroring captured messages, for relays.
    tx: mpsc::UnboundedSender<ClientMessage>,
    /// All captured messages (for verification).
    messages: Arc<Mutex<Vec<ClientMessage>>>,
}

impl MockSignalingClient {
    /// Create a new MockSignalingClient and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClientMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            messages: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// Create a MockSignalingClient without a receiver (messages are only stored).
    pub fn new_stored_only() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self {
            tx,
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn join_count(&self) -> usize {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|m| matches!(m, ClientMessage::JoinRoom { .. }))
            .count()
    }

    pub async fn leave_count(&self) -> usize {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|m| matches!(m, ClientMessage::LeaveRoom { .. }))
            .count()
    }

    /// All SDP offers sent so far, as (room id, sdp) pairs.
    pub async fn offers(&self) -> Vec<(RoomId, String)> {
        self.messages
            .lock()
            .await
            .iter()
            .filter_map(|m| match m {
                ClientMessage::Offer { room_id, sdp } => Some((room_id.clone(), sdp.clone())),
                _ => None,
            })
            .collect()
    }

    /// All SDP answers sent so far, as (room id, sdp) pairs.
    pub async fn answers(&self) -> Vec<(RoomId, String)> {
        self.messages
            .lock()
            .await
            .iter()
            .filter_map(|m| match m {
                ClientMessage::Answer { room_id, sdp } => Some((room_id.clone(), sdp.clone())),
                _ => None,
            })
            .collect()
    }

    pub async fn candidate_count(&self) -> usize {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|m| matches!(m, ClientMessage::IceCandidate { .. }))
            .count()
    }
}

impl Default for MockSignalingClient {
    fn default() -> Self {
        Self::new_stored_only()
    }
}

#[async_trait]
impl tigly_client::SignalingClient for MockSignalingClient {
    async fn send(&self, message: ClientMessage) {
        tracing::debug!("[MockSignaling] captured {:?}", message);
        self.messages.lock().await.push(message.clone());
        let _ = self.tx.send(message);
    }
}

use async_trait::async_trait;
use tigly_core::ClientMessage;

/// Outbound half of the signaling connection. Constructed by the embedding
/// application and injected into the session manager; the call core never
/// touches sockets itself. Implementations log their own transport
/// failures, the core does not retry.
#[async_trait]
pub trait SignalingClient: Send + Sync {
    async fn send(&self, msg: ClientMessage);
}

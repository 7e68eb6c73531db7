use thiserror::Error;

/// Why local capture could not be obtained. Surfaces as an absent local
/// source; the session keeps running but no call proceeds.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media permission denied: {0}")]
    PermissionDenied(String),

    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Failures while applying signaling payloads to the peer session. Caught
/// at the point of application and logged; the triggering message is
/// dropped and the current match simply does not complete.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("failed to apply signaling payload: {0}")]
    SignalingApply(#[from] webrtc::Error),

    #[error("malformed candidate payload: {0}")]
    MalformedCandidate(#[from] serde_json::Error),

    #[error("local description missing after negotiation step")]
    LocalDescriptionMissing,

    #[error("peer session already closed")]
    SessionClosed,
}

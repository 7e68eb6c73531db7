use std::sync::Arc;
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::track::track_remote::TrackRemote;

/// Events surfaced by a peer link's callback group. Every event carries the
/// epoch of the link that produced it, so events from a link that has since
/// been torn down are discarded instead of acting on the new session.
pub enum PeerEvent {
    /// A locally discovered connectivity candidate, ready to relay outward.
    CandidateDiscovered {
        epoch: u64,
        candidate: RTCIceCandidateInit,
    },
    /// A track the remote peer started sending.
    TrackArrived {
        epoch: u64,
        track: Arc<TrackRemote>,
    },
    /// Advisory connection-state transition; observed, never acted on.
    StateChanged {
        epoch: u64,
        state: RTCPeerConnectionState,
    },
}

impl PeerEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            PeerEvent::CandidateDiscovered { epoch, .. }
            | PeerEvent::TrackArrived { epoch, .. }
            | PeerEvent::StateChanged { epoch, .. } => *epoch,
        }
    }
}

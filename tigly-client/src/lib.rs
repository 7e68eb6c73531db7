//! Client-side call core for Tigly: pairs with a stranger through the
//! signaling server, then drives exactly one WebRTC negotiation per match.

pub mod config;
pub mod error;
pub mod media;
pub mod negotiation;
pub mod session;
pub mod signaling;

pub use config::CallConfig;
pub use error::{MediaError, NegotiationError};
pub use media::{LocalMediaSource, MediaAcquirer, RemoteMediaOutput, SyntheticAcquirer};
pub use negotiation::{CandidateBuffer, PeerEvent, PeerLink};
pub use session::{SessionError, SessionHandle, SessionManager, SessionRuntime};
pub use signaling::SignalingClient;
